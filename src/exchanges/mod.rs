//! Built-in venue descriptors
//!
//! 거래소별 디스크립터. Each module exposes its `ID`, the parent it `EXTENDS`
//! and a `describe()` literal holding only what differs from that parent.

pub mod base;
pub mod hadax;
pub mod huobicny;
pub mod huobipro;

use crate::venue::VenueSpec;

/// Built-in venues, parents before children
pub fn builtin() -> Vec<VenueSpec> {
    vec![
        VenueSpec::root(base::ID, base::describe),
        VenueSpec::extending(huobipro::ID, huobipro::EXTENDS, huobipro::describe),
        VenueSpec::extending(hadax::ID, hadax::EXTENDS, hadax::describe),
        VenueSpec::extending(huobicny::ID, huobicny::EXTENDS, huobicny::describe),
    ]
}
