//! Business logic services.
//!
//! # Services
//!
//! - `quote` - CEP → address → delivery fee pipeline
//! - `resolver` - CEP validation and address lookup
//! - `fee` - Fee table and calculator
//! - `lookup` - Outbound address lookup port
//! - `sellers` - Seller registration and management
//! - `addresses` - Delivery address registration

pub mod addresses;
pub mod fee;
pub mod lookup;
pub mod quote;
pub mod resolver;
pub mod sellers;

pub use addresses::{AddressError, AddressService};
pub use fee::{FeeCalculator, FeeTable};
pub use lookup::{AddressLookupClient, AddressRecord, LookupError, UpstreamFailure};
pub use quote::{FeeQuote, FeeQuoteService, QuoteError};
pub use resolver::{AddressResolver, ResolvedAddress};
pub use sellers::{SellerError, SellerService};
