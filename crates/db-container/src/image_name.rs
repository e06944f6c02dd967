//! Docker image references.

use std::fmt;
use std::str::FromStr;

use crate::error::ImageNameError;

const DEFAULT_TAG: &str = "latest";
const MAX_TAG_LEN: usize = 128;

/// A parsed `repository[:tag]` image reference.
///
/// The repository may carry a registry host (with an optional port) as its
/// first path component, e.g. `registry.example.com:5000/team/image:1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DockerImageName {
    repository: String,
    tag: String,
}

impl DockerImageName {
    /// Parses an image reference. A missing tag defaults to `latest`.
    pub fn parse(reference: &str) -> Result<Self, ImageNameError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ImageNameError::Empty);
        }
        if reference.contains('@') {
            return Err(ImageNameError::DigestUnsupported(reference.to_string()));
        }

        // A colon after the last slash separates the tag; earlier colons
        // belong to a registry port.
        let last_slash = reference.rfind('/').map_or(0, |i| i + 1);
        let (repository, tag) = match reference[last_slash..].rfind(':') {
            Some(i) => {
                let split = last_slash + i;
                (&reference[..split], &reference[split + 1..])
            }
            None => (reference, DEFAULT_TAG),
        };

        validate_repository(repository)?;
        validate_tag(reference, tag)?;

        Ok(Self {
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }

    /// Builds a reference from compile-time constants.
    ///
    /// # Panics
    ///
    /// Panics if `repository` or `tag` is malformed.
    pub fn from_static(repository: &'static str, tag: &'static str) -> Self {
        if let Err(e) = validate_repository(repository).and_then(|()| validate_tag(repository, tag)) {
            panic!("invalid static image reference: {e}");
        }
        Self {
            repository: repository.to_string(),
            tag: tag.to_string(),
        }
    }

    /// Returns the same repository with a different tag.
    pub fn with_tag(self, tag: &str) -> Result<Self, ImageNameError> {
        validate_tag(&self.repository, tag)?;
        Ok(Self {
            repository: self.repository,
            tag: tag.to_string(),
        })
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for DockerImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

impl FromStr for DockerImageName {
    type Err = ImageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_repository(repository: &str) -> Result<(), ImageNameError> {
    let invalid = || ImageNameError::InvalidRepository(repository.to_string());

    let mut components: Vec<&str> = repository.split('/').collect();
    if components.iter().any(|c| c.is_empty()) {
        return Err(invalid());
    }

    // Registry hosts are recognised by a dot, a port or being `localhost`.
    if components.len() > 1 {
        let first = components[0];
        if first.contains('.') || first.contains(':') || first == "localhost" {
            if !first
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
            {
                return Err(invalid());
            }
            components.remove(0);
        }
    }

    for component in components {
        let valid_chars = component
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'));
        let alnum_edges = component
            .chars()
            .next()
            .zip(component.chars().last())
            .is_some_and(|(a, b)| a.is_ascii_alphanumeric() && b.is_ascii_alphanumeric());
        if !valid_chars || !alnum_edges {
            return Err(invalid());
        }
    }
    Ok(())
}

fn validate_tag(reference: &str, tag: &str) -> Result<(), ImageNameError> {
    let mut chars = tag.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphanumeric() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
                && tag.len() <= MAX_TAG_LEN
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ImageNameError::InvalidTag {
            reference: reference.to_string(),
            tag: tag.to_string(),
        })
    }
}
