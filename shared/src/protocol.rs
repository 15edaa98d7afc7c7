use crate::{Credentials, PATH_PRODUCTS, PATH_SIGNUP, Product, ProductPayload};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// JSON body sent with the request, if any.
    type Body: Serialize;
    /// The response type returned by this request.
    type Response;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, relative to the API base.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }

    /// Decode a successful (2xx) response body.
    fn decode(body: &str) -> Result<Self::Response, serde_json::Error>;
}

/// Endpoints that only signal success through the status code.
/// The response body is ignored, so an empty 201/204 is fine.
fn acknowledge(_body: &str) -> Result<(), serde_json::Error> {
    Ok(())
}

fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(body)
}

/// Placeholder body type for requests without a body.
pub type NoBody = ();

// =========================================================
// Request Definitions
// =========================================================

/// List all products
#[derive(Debug, Clone, Copy)]
pub struct ListProductsRequest;

impl ApiRequest for ListProductsRequest {
    type Body = NoBody;
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_PRODUCTS.to_string()
    }

    fn decode(body: &str) -> Result<Self::Response, serde_json::Error> {
        decode_json(body)
    }
}

/// Fetch one product for the edit form
#[derive(Debug, Clone, Copy)]
pub struct GetProductRequest {
    pub id: u64,
}

impl ApiRequest for GetProductRequest {
    type Body = NoBody;
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        Product::resource_path(self.id)
    }

    fn decode(body: &str) -> Result<Self::Response, serde_json::Error> {
        decode_json(body)
    }
}

/// Create a new product
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub payload: ProductPayload,
}

impl ApiRequest for CreateProductRequest {
    type Body = ProductPayload;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PATH_PRODUCTS.to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.payload)
    }

    fn decode(body: &str) -> Result<Self::Response, serde_json::Error> {
        acknowledge(body)
    }
}

/// Replace an existing product
#[derive(Debug, Clone)]
pub struct UpdateProductRequest {
    pub id: u64,
    pub payload: ProductPayload,
}

impl ApiRequest for UpdateProductRequest {
    type Body = ProductPayload;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        Product::resource_path(self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.payload)
    }

    fn decode(body: &str) -> Result<Self::Response, serde_json::Error> {
        acknowledge(body)
    }
}

/// Delete a product
#[derive(Debug, Clone, Copy)]
pub struct DeleteProductRequest {
    pub id: u64,
}

impl ApiRequest for DeleteProductRequest {
    type Body = NoBody;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        Product::resource_path(self.id)
    }

    fn decode(body: &str) -> Result<Self::Response, serde_json::Error> {
        acknowledge(body)
    }
}

/// Register a new account
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub credentials: Credentials,
}

impl ApiRequest for SignupRequest {
    type Body = Credentials;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PATH_SIGNUP.to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.credentials)
    }

    fn decode(body: &str) -> Result<Self::Response, serde_json::Error> {
        acknowledge(body)
    }
}
