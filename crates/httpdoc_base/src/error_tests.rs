/* # Why use a separate file for these error tests?

These tests snapshot full error renderings. Keeping them out of the main error
module means edits to error.rs do not churn the snapshot expectations.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{HttpdocError, HttpdocResult, ResultExt};
    use expect_test::expect;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_display_file_error_with_context() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file or directory");
        let error = HttpdocError::new(ErrorKind::FileError {
            path: PathBuf::from("docs/api.md"),
            source: io_err,
        })
        .context("loading markup source");

        expect![[r#"loading markup source: File error at docs/api.md: no such file or directory"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_display_invalid_status_code() {
        let error = HttpdocError::new(ErrorKind::InvalidStatusCode {
            input: "teapot".to_string(),
        });

        expect![[r#"'teapot' is not a valid HTTP status code"#]].assert_eq(&error.to_string());
    }

    #[test]
    fn test_display_unknown_method() {
        let error = HttpdocError::new(ErrorKind::UnknownMethod {
            method: "fetch".to_string(),
        });

        expect![[r#"FETCH is not a valid HTTP method"#]].assert_eq(&error.to_string());
    }

    #[test]
    fn test_display_propagated_chain() {
        let result: HttpdocResult<()> = Err(Box::new(HttpdocError::message("bad directive")));
        let error = result
            .context("extracting routes from docs/users.md")
            .unwrap_err();

        expect![[r#"extracting routes from docs/users.md: bad directive"#]]
            .assert_eq(&error.to_string());
    }
}
