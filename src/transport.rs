//! Browser Transport
//!
//! `HttpTransport` over the fetch API. Requests carry same-origin
//! credentials so the session cookie reaches the backend.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, HtmlDocument, Request, RequestCredentials, RequestInit, Response};

use list_view::{HttpRequest, HttpResponse, HttpTransport};

pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let window = web_sys::window().ok_or_else(|| "no window".to_string())?;

        let headers = Headers::new().map_err(js_error)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(js_error)?;
        }

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_headers(&headers);
        init.set_credentials(RequestCredentials::SameOrigin);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let fetch_request = Request::new_with_str_and_init(&request.url, &init).map_err(js_error)?;
        let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        let body = JsFuture::from(response.text().map_err(js_error)?).await.map_err(js_error)?;

        Ok(HttpResponse {
            status: response.status(),
            status_text: response.status_text(),
            body: body.as_string().unwrap_or_default(),
        })
    }
}

fn js_error(value: JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{:?}", value),
    }
}

/// Raw `document.cookie`, empty when unavailable.
pub fn document_cookies() -> String {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
        .and_then(|document| document.cookie().ok())
        .unwrap_or_default()
}
