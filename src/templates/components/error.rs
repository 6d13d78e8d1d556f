use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => render_error(404, "Not Found"),

        ServerError::BadRequest(msg) => {
            warn!(%msg, "bad request");
            render_error(400, &msg)
        }

        ServerError::Data(e) => {
            error!(error = %e, "data error");
            render_error(500, &format!("Data Error: {e}"))
        }

        ServerError::XlsxError(msg) => {
            error!(%msg, "spreadsheet error");
            render_error(500, &format!("Spreadsheet Error: {msg}"))
        }

        ServerError::InternalError => render_error(500, "Internal Server Error"),
    }
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style { (maud::PreEscaped(ERROR_STYLE)) }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to the form" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

const ERROR_STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }
h1 { font-size: 2rem; margin-bottom: 1rem; }
p { font-size: 1.1rem; color: #444; }
"#;
