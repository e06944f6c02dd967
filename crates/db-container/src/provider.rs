//! Database-type factories.

use crate::database::JdbcDatabaseImage;
use crate::error::ImageNameError;

/// Creates unstarted container configurations for one database type.
pub trait DatabaseContainerProvider {
    type Image: JdbcDatabaseImage;

    /// Whether this provider handles `database_type` (e.g. `"hana"`).
    fn supports(&self, database_type: &str) -> bool;

    /// A configuration using the provider's default image tag.
    fn new_instance(&self) -> Self::Image;

    /// A configuration using `tag`, or the default tag when `None`.
    fn new_instance_with_tag(&self, tag: Option<&str>) -> Result<Self::Image, ImageNameError>;
}

/// Picks the first provider that supports `database_type`.
pub fn find_provider<'a, P>(providers: &'a [P], database_type: &str) -> Option<&'a P>
where
    P: DatabaseContainerProvider,
{
    providers.iter().find(|p| p.supports(database_type))
}
