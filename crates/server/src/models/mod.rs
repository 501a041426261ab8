//! Domain models and request/response bodies.

pub mod address;
pub mod seller;

pub use address::{Address, AddressForm, AddressResponse, NewAddress};
pub use seller::{NewSeller, Seller, SellerForm, SellerResponse, SellerUpdateForm};
