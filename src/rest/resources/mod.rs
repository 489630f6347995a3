//! Concrete DigitalOcean resource types.
//!
//! Each resource is a thin newtype over [`ResourceData`](crate::rest::ResourceData)
//! with a static descriptor table and typed getters:
//!
//! - [`Droplet`]: a virtual machine, with an embedded [`Region`]
//! - [`DropletContainer`]: the envelope of `GET /v2/droplets/<id>`
//! - [`DropletList`]: the paginated collection of `GET /v2/droplets`
//! - [`Region`]: a datacenter region
//! - [`VoidResource`]: a resource with no declared properties
//!
//! # Example
//!
//! ```rust,ignore
//! use digitalocean_sdk::rest::resources::{Droplet, DropletList};
//!
//! let droplets: DropletList = data_store.get_resource("/v2/droplets").await?;
//! let page = droplets.current_page()?;
//! for droplet in &page {
//!     println!("{:?}", droplet.name()?);
//! }
//! ```

mod droplet;
mod region;
mod void;

pub use droplet::{Droplet, DropletContainer, DropletList};
pub use region::Region;
pub use void::VoidResource;
