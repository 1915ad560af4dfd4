//! Users Domain
//!
//! User records with unique emails, plus read-only access to each user's
//! orders held by the external order service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐       ┌──────────────┐
//! │   Service   │  ───► │ Order client │  ← GET {ORDER_SERVICE_URL}/user/{id}
//! └──────┬──────┘       └──────────────┘
//!        │                 validation, uniqueness pre-check
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (in-memory or PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, UserInput, OrderSummary
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers, HttpOrderClient, InMemoryUserRepository, OrderServiceConfig, UserService,
//! };
//!
//! let repository = InMemoryUserRepository::new();
//! let orders = HttpOrderClient::new(OrderServiceConfig::default()).unwrap();
//! let service = UserService::new(repository, orders);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod order_client;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ErrorKind, UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{OrderSummary, SearchParams, User, UserInput};
pub use order_client::{HttpOrderClient, OrderClient, OrderClientError, OrderServiceConfig};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
