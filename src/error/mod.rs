//! Error handling for the generation pipeline.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain errors**: [`TransportError`] and [`ProtocolError`]
//! - **Unified error**: [`StudioError`] consolidates everything the
//!   orchestrator can observe
//! - **Result alias**: [`StudioResult<T>`]
//!
//! | Category | Source | Retried | Ends turn |
//! |----------|--------|---------|-----------|
//! | Network | HTTP / connection / read | Yes, except 4xx client errors | After retries |
//! | Protocol | Malformed `data:` payload | No | No |
//! | Server | `error` event | No | Yes |
//! | User | Caller misuse | No | Nothing started |
//! | Cancelled | Deliberate abort | No | Yes, silently |

mod category;
mod protocol;
mod result;
mod studio_error;
mod transport;

pub use category::ErrorCategory;
pub use protocol::ProtocolError;
pub use result::StudioResult;
pub use studio_error::StudioError;
pub use transport::TransportError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let transport: StudioError = TransportError::ConnectionFailed("refused".to_string()).into();
        let protocol: StudioError = ProtocolError::MissingData {
            event_type: "thought".to_string(),
        }
        .into();
        let application = StudioError::Application {
            message: "quota exceeded".to_string(),
        };

        assert_eq!(transport.category(), ErrorCategory::Network);
        assert_eq!(protocol.category(), ErrorCategory::Protocol);
        assert_eq!(application.category(), ErrorCategory::Server);

        for err in [&transport, &protocol, &application] {
            assert!(!err.user_message().is_empty());
            assert!(!err.error_code().is_empty());
        }
    }

    #[test]
    fn test_result_alias() {
        fn might_fail(fail: bool) -> StudioResult<u8> {
            if fail {
                Err(StudioError::EmptyInput)
            } else {
                Ok(1)
            }
        }

        assert_eq!(might_fail(false), Ok(1));
        assert_eq!(might_fail(true), Err(StudioError::EmptyInput));
    }
}
