//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use greedyquads::QuadsError;
    use greedyquads::io::error::{
        ErrorContext, WithContext, invalid_image, invalid_parameter, invalid_state,
    };
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = QuadsError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(invalid_image(&"empty").source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("iterations", &0, &"must be between 1 and 1000000");
        let message = error.to_string();

        assert!(message.contains("iterations"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be between"));
    }

    // Tests state errors mention the iteration only when known
    // Verified by always printing an iteration
    #[test]
    fn test_invalid_state_message() {
        let bare = invalid_state("split", &"region is a single pixel");
        assert_eq!(
            bare.to_string(),
            "Invalid state during split: region is a single pixel"
        );

        let located: Result<(), QuadsError> = Err(bare);
        let message = located.with_iteration(12).unwrap_err().to_string();
        assert!(message.contains("at iteration 12"));
    }

    // Tests context replaces the operation and iteration of state errors
    // Verified by ignoring the operation override
    #[test]
    fn test_with_context_overrides() {
        let result: Result<(), QuadsError> = Err(invalid_state("split", &"already split"));
        let error = result
            .with_context(ErrorContext {
                iteration: Some(3),
                operation: Some("refinement step"),
            })
            .unwrap_err();

        match error {
            QuadsError::InvalidState {
                operation,
                iteration,
                ..
            } => {
                assert_eq!(operation, "refinement step");
                assert_eq!(iteration, Some(3));
            }
            other => panic!("expected state error, got {other:?}"),
        }
    }

    // Tests context leaves other error kinds untouched
    // Verified by converting every error into a state error
    #[test]
    fn test_with_context_other_errors() {
        let result: Result<(), QuadsError> = Err(invalid_image(&"zero pixels"));
        let error = result.with_iteration(5).unwrap_err();
        assert!(matches!(error, QuadsError::InvalidImage { .. }));
        assert!(!error.to_string().contains('5'));
    }

    // Tests io errors convert with a placeholder path
    // Verified by dropping the source on conversion
    #[test]
    fn test_from_io_error() {
        let io_result: Result<(), std::io::Error> = Err(std::io::Error::other("disk gone"));
        let error = io_result.with_iteration(1).unwrap_err();

        assert!(matches!(error, QuadsError::FileSystem { .. }));
        assert!(error.to_string().contains("disk gone"));
        assert!(error.source().is_some());
    }

    // Tests image errors name the path involved
    // Verified by omitting the path from the message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::other("read-only"));
        let error = QuadsError::ImageExport {
            path: "out/result.png".into(),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("out/result.png"));
        assert!(message.contains("read-only"));
    }
}
