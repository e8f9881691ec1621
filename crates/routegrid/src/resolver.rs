//! Name resolution
//!
//! Maps a resource kind plus an exact name to zero, one, or "ambiguous"
//! remote objects. Pure read, safe to repeat; it is NOT transactional
//! with any mutation that follows, so callers re-resolve immediately
//! before mutating and accept the residual time-of-check/time-of-use
//! window.

use routegrid_core::{ControlPlane, Network, ProvisionError, ResourceKind, Result, Router, Subnet};

/// Outcome of resolving one name against the live remote state.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Found(T),
    NotFound,
    /// More than one live object carries the name. Always fatal: remote
    /// state already violates the uniqueness assumption and the engine
    /// must not guess which object was intended.
    Ambiguous(usize),
}

impl<T> Resolution<T> {
    fn from_matches(mut matches: Vec<T>) -> Self {
        match matches.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Found(matches.remove(0)),
            n => Resolution::Ambiguous(n),
        }
    }

    /// The object, or the taxonomy error for a missing/ambiguous name.
    pub fn required(self, kind: ResourceKind, name: &str) -> Result<T> {
        match self {
            Resolution::Found(object) => Ok(object),
            Resolution::NotFound => Err(ProvisionError::NotFound {
                kind,
                name: name.to_string(),
            }),
            Resolution::Ambiguous(count) => Err(ProvisionError::Ambiguous {
                kind,
                name: name.to_string(),
                count,
            }),
        }
    }

    /// Like [`required`](Self::required), but a missing name is the
    /// caller's dependency rather than its subject.
    pub fn required_dependency(self, kind: ResourceKind, name: &str) -> Result<T> {
        match self {
            Resolution::NotFound => Err(ProvisionError::DependencyNotFound {
                kind,
                name: name.to_string(),
            }),
            other => other.required(kind, name),
        }
    }
}

/// Name resolver over one control-plane session.
pub struct Resolver<'a> {
    plane: &'a dyn ControlPlane,
}

impl<'a> Resolver<'a> {
    pub fn new(plane: &'a dyn ControlPlane) -> Self {
        Self { plane }
    }

    pub async fn router(&self, name: &str) -> Result<Resolution<Router>> {
        let matches = self.plane.list_routers(Some(name)).await?;
        Ok(resolve(matches, name, |r| &r.name))
    }

    pub async fn network(&self, name: &str) -> Result<Resolution<Network>> {
        let matches = self.plane.list_networks(Some(name)).await?;
        Ok(resolve(matches, name, |n| &n.name))
    }

    pub async fn subnet(&self, name: &str) -> Result<Resolution<Subnet>> {
        let matches = self.plane.list_subnets(Some(name)).await?;
        Ok(resolve(matches, name, |s| &s.name))
    }
}

/// Shared disambiguation: the listing was name-filtered, but back ends
/// that only substring-match (or ignore the filter) return supersets, so
/// exact-match again before counting.
fn resolve<T>(matches: Vec<T>, name: &str, get_name: impl Fn(&T) -> &str) -> Resolution<T> {
    let exact: Vec<T> = matches
        .into_iter()
        .filter(|item| get_name(item) == name)
        .collect();
    Resolution::from_matches(exact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use routegrid_core::MemoryControlPlane;

    #[tokio::test]
    async fn found_not_found() {
        let plane = MemoryControlPlane::new();
        plane.add_router("edge-1");
        let resolver = Resolver::new(&plane);

        let hit = resolver.router("edge-1").await.unwrap();
        assert!(matches!(hit, Resolution::Found(ref r) if r.name == "edge-1"));

        let miss = resolver.router("edge-2").await.unwrap();
        assert_eq!(miss, Resolution::NotFound);
    }

    #[tokio::test]
    async fn duplicate_names_are_ambiguous() {
        let plane = MemoryControlPlane::new();
        plane.add_router("dup");
        plane.add_router("dup");
        let resolver = Resolver::new(&plane);

        let outcome = resolver.router("dup").await.unwrap();
        assert_eq!(outcome, Resolution::Ambiguous(2));

        let err = outcome.required(ResourceKind::Router, "dup").unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::Ambiguous { count: 2, .. }
        ));
    }

    #[tokio::test]
    async fn exact_match_only() {
        let plane = MemoryControlPlane::new();
        plane.add_router("edge-1");
        let resolver = Resolver::new(&plane);

        assert_eq!(resolver.router("edge").await.unwrap(), Resolution::NotFound);
        assert_eq!(
            resolver.router("edge-10").await.unwrap(),
            Resolution::NotFound
        );
    }

    #[tokio::test]
    async fn dependency_reading_of_not_found() {
        let plane = MemoryControlPlane::new();
        let resolver = Resolver::new(&plane);
        let err = resolver
            .network("public-net")
            .await
            .unwrap()
            .required_dependency(ResourceKind::Network, "public-net")
            .unwrap_err();
        assert!(matches!(err, ProvisionError::DependencyNotFound { .. }));
    }
}
