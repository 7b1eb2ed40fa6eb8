//! Endpoint binding
//!
//! 디스크립터의 엔드포인트 목록을 호출 가능한 Operation 테이블로 변환

mod binder;
mod operation;

pub use binder::{bind, camel_case_id, snake_case_id, Operations};
pub use operation::{AccessLevel, HttpMethod, Operation};
