//! Bound operations

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::errors::CcxtError;

/// Access level of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    /// No authentication
    Public,
    /// Requires a signing strategy and credentials
    Private,
}

impl AccessLevel {
    /// `private` is the only signed section; `public`, `market` and any other section are public.
    pub fn for_section(section: &str) -> Self {
        if section == "private" {
            AccessLevel::Private
        } else {
            AccessLevel::Public
        }
    }
}

/// HTTP 메서드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// GET and DELETE requests are sent without a body
    pub fn carries_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }

    /// Capitalized verb as it appears in operation identifiers (`Get`)
    pub fn title(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Delete => "Delete",
            HttpMethod::Patch => "Patch",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = CcxtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            "patch" => Ok(HttpMethod::Patch),
            _ => Err(CcxtError::malformed("api", format!("unknown HTTP verb `{s}`"))),
        }
    }
}

/// One callable endpoint, bound from a single declaration
#[derive(Debug, Clone)]
pub struct Operation {
    pub(crate) id: String,
    pub(crate) section: String,
    pub(crate) access: AccessLevel,
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) placeholders: Vec<String>,
    pub(crate) descriptor: Arc<Descriptor>,
}

impl Operation {
    /// camelCase identifier (`publicGetHadaxCommonSymbols`)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Descriptor section the path was declared under (`public`, `private`, `market`)
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn access(&self) -> AccessLevel {
        self.access
    }

    pub fn is_private(&self) -> bool {
        self.access == AccessLevel::Private
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path template as declared (`order/orders/{id}`)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Placeholder names in template order
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Effective descriptor of the owning venue
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Human-readable declaration, used in collision reports
    pub fn declaration(&self) -> String {
        format!("{} {} {}", self.section, self.method, self.path)
    }
}

/// Extracts `{name}` placeholders in order of appearance.
pub(crate) fn placeholders(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(after[..end].to_string());
                rest = &after[end + 1..];
            },
            None => break,
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("fetch".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_body_carrying_methods() {
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
    }

    #[test]
    fn test_access_for_section() {
        assert_eq!(AccessLevel::for_section("private"), AccessLevel::Private);
        assert_eq!(AccessLevel::for_section("public"), AccessLevel::Public);
        assert_eq!(AccessLevel::for_section("market"), AccessLevel::Public);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("dw/withdraw-virtual/{id}/place"),
            vec!["id".to_string()]
        );
        assert_eq!(
            placeholders("a/{symbol}/b/{id}"),
            vec!["symbol".to_string(), "id".to_string()]
        );
        assert!(placeholders("common/symbols").is_empty());
    }
}
