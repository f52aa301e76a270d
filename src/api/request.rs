//! API request helpers

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use url::Host;

use super::Error;

/// Parse a required text field
///
/// ```rust
/// let service = " Online Store ";
/// assert_eq!(parse_required("service", service).unwrap(), "Online Store".to_string())
/// ```
pub fn parse_required(field: &str, value: &str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        return Err(Error::bad_request(format!("Field `{field}` is required")));
    }

    Ok(value.to_string())
}

/// Parse an optional text field, blank counts as missing
pub fn parse_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse and normalize the domain of an alias
///
/// ```rust
/// let domain = "Canary.com";
/// assert_eq!(parse_domain(domain).unwrap(), "canary.com".to_string())
/// ```
pub fn parse_domain(domain: &str) -> Result<String, Error> {
    match Host::parse(domain.trim()) {
        Ok(Host::Domain(domain)) => Ok(domain),
        Ok(Host::Ipv4(_) | Host::Ipv6(_)) => {
            Err(Error::bad_request("Domain can not be an IP address"))
        }
        Err(err) => Err(Error::bad_request("Invalid domain").with_description(err)),
    }
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request("Data error").with_description(err))
            }
            JsonRejection::JsonSyntaxError(err) => {
                let description = std::error::Error::source(&err)
                    .map_or_else(|| err.body_text(), ToString::to_string);

                Err(Error::bad_request("JSON syntax error").with_description(description))
            }
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_description(err))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::bad_request("Invalid path parameter").with_description(err))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request("Missing path parameter").with_description(err))
            }
            err => Err(Error::bad_request("Unknown path error").with_description(err)),
        },
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<P>::from_request_parts(parts, state).await;

        parse_path(path).map(PathParameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required() {
        assert_eq!(
            parse_required("service", " Online Store ").unwrap(),
            "Online Store".to_string()
        );
        assert!(parse_required("service", "   ").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(Some("  ".to_string())), None);
        assert_eq!(
            parse_optional(Some(" For shopping ".to_string())),
            Some("For shopping".to_string())
        );
        assert_eq!(parse_optional(None), None);
    }

    #[test]
    fn test_parse_domain() {
        assert_eq!("canary.com", parse_domain("Canary.com").unwrap());
        let domain = parse_domain(" mail.example.org ").unwrap();
        assert_eq!("mail.example.org", domain);
        assert!(parse_domain("127.0.0.1").is_err());
        assert!(parse_domain("not a domain").is_err());
        assert!(parse_domain("").is_err());
    }
}
