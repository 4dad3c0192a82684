//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module    | TOML Section | Purpose                               |
//! |-----------|--------------|---------------------------------------|
//! | `uploads` | `[uploads]`  | Uploads base URL, fallback image      |
//! | `links`   | `[links]`    | Link health tracker settings          |

mod links;
mod uploads;

pub use links::LinksConfig;
pub use uploads::UploadsConfig;
