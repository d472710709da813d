use crate::app::ports::IdentityResolverPort;
use crate::config::SubjectConfig;
use crate::observability::identity as metrics;
use crate::types::Subject;
use tracing::{info, warn};

/// Outcome of resolving a batch of configured subjects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub resolved: Vec<Subject>,
    pub unresolved: Vec<String>,
}

/// Use case for turning configured subject names into player identifiers
pub struct ResolveUseCase {
    resolver: Box<dyn IdentityResolverPort>,
}

impl ResolveUseCase {
    pub fn new(resolver: Box<dyn IdentityResolverPort>) -> Self {
        Self { resolver }
    }

    /// Resolve every configured subject. Entries that already carry an id are
    /// passed through; lookups that fail or find nobody land in `unresolved`.
    pub async fn resolve_all(&self, subjects: &[SubjectConfig]) -> Resolution {
        let mut resolution = Resolution::default();

        for subject in subjects {
            if let Some(id) = subject.id {
                resolution.resolved.push(Subject { name: subject.name.clone(), id });
                continue;
            }

            let lookup_name = subject.name.replace('_', " ");
            match self.resolver.resolve(&lookup_name).await {
                Ok(Some(id)) => {
                    info!(name = %subject.name, id, "resolved subject");
                    resolution.resolved.push(Subject { name: subject.name.clone(), id });
                }
                Ok(None) => {
                    warn!(name = %subject.name, "no player found; subject omitted from run");
                    metrics::unresolved();
                    resolution.unresolved.push(subject.name.clone());
                }
                Err(e) => {
                    warn!(name = %subject.name, error = %e, "player lookup failed; subject omitted from run");
                    metrics::unresolved();
                    resolution.unresolved.push(subject.name.clone());
                }
            }
        }

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FirstPitchError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct MockResolver {
        known: HashMap<&'static str, u64>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl IdentityResolverPort for MockResolver {
        async fn resolve(&self, display_name: &str) -> Result<Option<u64>> {
            self.calls.lock().unwrap().push(display_name.to_string());
            if display_name == "Broken Lookup" {
                return Err(FirstPitchError::Status { status: 503, url: "people".into() });
            }
            Ok(self.known.get(display_name).copied())
        }
    }

    fn subject(name: &str, id: Option<u64>) -> SubjectConfig {
        SubjectConfig { name: name.to_string(), id }
    }

    #[tokio::test]
    async fn test_resolve_all_partitions_subjects() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let use_case = ResolveUseCase::new(Box::new(MockResolver {
            known: HashMap::from([("Aaron Nola", 605400)]),
            calls: calls.clone(),
        }));

        let resolution = use_case
            .resolve_all(&[
                subject("Zack_Wheeler", Some(554430)),
                subject("Aaron_Nola", None),
                subject("Nobody Atall", None),
                subject("Broken Lookup", None),
            ])
            .await;

        assert_eq!(
            resolution.resolved,
            vec![
                Subject { name: "Zack_Wheeler".into(), id: 554430 },
                Subject { name: "Aaron_Nola".into(), id: 605400 },
            ]
        );
        assert_eq!(resolution.unresolved, vec!["Nobody Atall".to_string(), "Broken Lookup".to_string()]);

        // Pre-resolved subjects never hit the resolver; underscores become spaces.
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["Aaron Nola".to_string(), "Nobody Atall".to_string(), "Broken Lookup".to_string()]
        );
    }
}
