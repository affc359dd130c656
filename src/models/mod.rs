mod address;
mod admin;
mod cart;
mod media;
mod order;
mod product;
mod user;
mod webhook;

pub use address::*;
pub use admin::*;
pub use cart::*;
pub use media::*;
pub use order::*;
pub use product::*;
pub use user::*;
pub use webhook::*;
