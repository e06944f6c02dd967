//! Factory for HANA containers.

use db_container::{DatabaseContainerProvider, DockerImageName, ImageNameError};

use crate::image::{HanaImage, IMAGE, NAME};

/// Creates [`HanaImage`] configurations for the `hana` database type.
#[derive(Debug, Clone, Copy, Default)]
pub struct HanaContainerProvider;

impl DatabaseContainerProvider for HanaContainerProvider {
    type Image = HanaImage;

    fn supports(&self, database_type: &str) -> bool {
        database_type == NAME
    }

    fn new_instance(&self) -> HanaImage {
        HanaImage::default()
    }

    fn new_instance_with_tag(&self, tag: Option<&str>) -> Result<HanaImage, ImageNameError> {
        match tag {
            Some(tag) => Ok(HanaImage::new(DockerImageName::parse(IMAGE)?.with_tag(tag)?)),
            None => Ok(self.new_instance()),
        }
    }
}
