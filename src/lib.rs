//! # brrtguard
//!
//! **brrtguard** validates HTTP request parameters against declarative,
//! OpenAPI/Swagger style parameter descriptors before a handler runs.
//!
//! ## Overview
//!
//! A route declares its parameters once (name, location, type, constraints).
//! A [`ParameterValidator`](validator::ParameterValidator) built from that list
//! checks every incoming request and either hands the coerced values to the
//! handler or answers with an RFC 7807 problem response describing the first
//! violation.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Parameter descriptors and descriptor-list loading/linting
//! - **[`validator`]** - Rule checkers, type coercion, and the validator itself
//! - **[`request`]** - The read-only request view the validator consumes
//! - **[`response`]** - Handler responses and problem details
//! - **[`middleware`]** - Before/after hooks; the validator is one of them
//! - **[`runtime_config`]** - `BRRTR_*` environment configuration
//! - **[`logging`]** - `tracing-subscriber` setup
//!
//! ### Request Validation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Router
//!     participant Wrapped as Wrapped Handler
//!     participant Validator as ParameterValidator
//!     participant Handler
//!
//!     Router->>Wrapped: call(&request)
//!     Wrapped->>Validator: validate(&request)
//!     loop each descriptor, in order
//!         Validator->>Validator: presence check
//!         Validator->>Validator: coerce to declared type
//!         Validator->>Validator: pattern, minimum, maximum,<br/>minLength, maxLength, enum
//!     end
//!     alt first violation
//!         Validator-->>Wrapped: ValidationError
//!         Wrapped-->>Router: 400 problem+json { detail }
//!     else all valid
//!         Validator-->>Wrapped: ValidatedParams
//!         Wrapped->>Handler: handler(&request, params)
//!         Handler-->>Router: HandlerResponse
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtguard::request::HandlerRequest;
//! use brrtguard::response::HandlerResponse;
//! use brrtguard::spec::load_parameters;
//! use brrtguard::validator::ParameterValidator;
//! use http::Method;
//!
//! let params = load_parameters(r#"
//! - { name: id, in: path, type: integer, required: true }
//! - { name: limit, in: query, type: integer, maximum: 100 }
//! "#).expect("valid descriptors");
//!
//! let get_pet = ParameterValidator::new(params).wrap(
//!     |_req: &HandlerRequest, params| {
//!         HandlerResponse::json(200, params.to_json())
//!     },
//! );
//!
//! let req = HandlerRequest::new(Method::GET, "/pets/7?limit=500").with_path_param("id", "7");
//! let res = get_pet(&req);
//! assert_eq!(res.status, 400);
//! assert_eq!(res.body["detail"], "Invalid value, must be at most 100");
//! ```
//!
//! ## Runtime Considerations
//!
//! Validation is synchronous and CPU-only. A validator holds nothing but its
//! immutable descriptor list and configuration, so a single instance (or a
//! wrapped handler) can be shared across threads and called concurrently.

pub mod logging;
pub mod middleware;
pub mod request;
pub mod response;
pub mod runtime_config;
pub mod spec;
pub mod validator;

pub use request::{HandlerRequest, RequestValues};
pub use response::{problem, HandlerResponse, Problem};
pub use spec::{
    load_parameters, load_parameters_from_path, ParameterLocation, ParameterMeta, ParameterType,
};
pub use validator::{ParamValue, ParameterValidator, ValidatedParams, ValidationError};
