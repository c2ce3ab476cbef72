//! Record normalization: collecting DMARC, SPF, and DKIM records per domain.
//!
//! `query_domain` is the normalizer contract: it never fails as a whole.
//! Each mechanism's lookup is attempted independently, and any failure is
//! converted into a single-element diagnostic RecordSet at this boundary,
//! so a snapshot always carries all three fields.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::warn;

use crate::dns::{quoted_payload, LookupError, TxtLookup};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::initialization::init_semaphore;
use crate::models::{DomainQuery, DomainSnapshot, RecordSet};

/// The three email-authentication mechanisms checked per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// DMARC policy record at `_dmarc.<domain>`.
    Dmarc,
    /// SPF record at the domain apex.
    Spf,
    /// DKIM key record at `<selector>._domainkey.<domain>`.
    Dkim,
}

impl Mechanism {
    /// The version marker an answer must contain to count for this
    /// mechanism.
    pub fn marker(&self) -> &'static str {
        match self {
            Mechanism::Dmarc => "v=DMARC1",
            Mechanism::Spf => "v=spf1",
            Mechanism::Dkim => "v=DKIM1",
        }
    }

    /// The DNS name queried for this mechanism.
    pub fn query_name(&self, query: &DomainQuery) -> String {
        match self {
            Mechanism::Dmarc => format!("_dmarc.{}", query.domain),
            Mechanism::Spf => query.domain.clone(),
            Mechanism::Dkim => format!("{}._domainkey.{}", query.selector, query.domain),
        }
    }

    /// The diagnostic string placed in the RecordSet when the lookup
    /// fails. The DKIM form names the selector, since a wrong selector is
    /// the most common cause.
    pub fn diagnostic(&self, query: &DomainQuery) -> String {
        match self {
            Mechanism::Dmarc => format!("Unable to get DMARC record for \"{}\"", query.domain),
            Mechanism::Spf => format!("Unable to get SPF record for \"{}\"", query.domain),
            Mechanism::Dkim => format!(
                "Unable to get DKIM record for \"{}\" with selector \"{}\"",
                query.domain, query.selector
            ),
        }
    }

    fn error_type(&self) -> ErrorType {
        match self {
            Mechanism::Dmarc => ErrorType::DmarcLookupError,
            Mechanism::Spf => ErrorType::SpfLookupError,
            Mechanism::Dkim => ErrorType::DkimLookupError,
        }
    }
}

impl std::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mechanism::Dmarc => "DMARC",
            Mechanism::Spf => "SPF",
            Mechanism::Dkim => "DKIM",
        })
    }
}

/// Runs one mechanism's TXT lookup and normalizes the outcome.
///
/// Successful lookups keep the answers containing the mechanism's version
/// marker, in resolver order, reduced to their quoted payloads. Failures
/// and timeouts become the mechanism's diagnostic RecordSet; they are
/// counted and logged, never propagated.
async fn check_mechanism<R>(
    resolver: &R,
    stats: &ProcessingStats,
    mechanism: Mechanism,
    query: &DomainQuery,
    timeout: Duration,
) -> RecordSet
where
    R: TxtLookup + ?Sized,
{
    let name = mechanism.query_name(query);
    let outcome = match tokio::time::timeout(timeout, resolver.lookup_txt(&name)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(LookupError::Timeout(timeout.as_secs())),
    };

    match outcome {
        Ok(answers) => {
            let values: Vec<String> = answers
                .iter()
                .filter(|answer| answer.contains(mechanism.marker()))
                .map(|answer| quoted_payload(answer))
                .collect();
            RecordSet::from_values(values)
        }
        Err(e) => {
            warn!("{mechanism} lookup failed for {name}: {e}");
            stats.increment_error(mechanism.error_type());
            RecordSet::diagnostic(mechanism.diagnostic(query))
        }
    }
}

/// Collects all three mechanisms for one domain.
///
/// Never fails: each lookup is independent and a failure in one does not
/// affect the others.
pub async fn query_domain<R>(
    resolver: &R,
    stats: &ProcessingStats,
    query: &DomainQuery,
    timeout: Duration,
) -> DomainSnapshot
where
    R: TxtLookup + ?Sized,
{
    let dmarc = check_mechanism(resolver, stats, Mechanism::Dmarc, query, timeout).await;
    let spf = check_mechanism(resolver, stats, Mechanism::Spf, query, timeout).await;
    let dkim = check_mechanism(resolver, stats, Mechanism::Dkim, query, timeout).await;

    DomainSnapshot {
        domain: query.domain.clone(),
        dmarc,
        spf,
        dkim,
    }
}

/// Runs the normalizer over a batch of queries with bounded concurrency.
///
/// Domains are independent, so each runs as its own task behind a
/// semaphore permit. Tasks complete in arbitrary order; results carry
/// their input index and are re-sequenced after the join so CSV/JSON
/// output stays deterministic. A domain appearing more than once in the
/// input produces multiple independent snapshots.
pub async fn run_queries<R>(
    resolver: Arc<R>,
    stats: Arc<ProcessingStats>,
    queries: &[DomainQuery],
    max_concurrency: usize,
    timeout: Duration,
    completed: Arc<AtomicUsize>,
) -> Vec<DomainSnapshot>
where
    R: TxtLookup + ?Sized + 'static,
{
    let semaphore = init_semaphore(max_concurrency);
    let mut tasks = FuturesUnordered::new();

    for (index, query) in queries.iter().cloned().enumerate() {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Semaphore closed, skipping domain: {}", query.domain);
                continue;
            }
        };

        let resolver = Arc::clone(&resolver);
        let stats = Arc::clone(&stats);
        let completed = Arc::clone(&completed);
        tasks.push(tokio::spawn(async move {
            let _permit = permit;
            let snapshot = query_domain(resolver.as_ref(), &stats, &query, timeout).await;
            completed.fetch_add(1, Ordering::SeqCst);
            (index, snapshot)
        }));
    }

    let mut indexed: Vec<(usize, DomainSnapshot)> = Vec::with_capacity(queries.len());
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok(pair) => indexed.push(pair),
            Err(e) => warn!("Domain check task failed to complete: {e}"),
        }
    }

    // Restore input order after concurrent execution
    indexed.sort_by_key(|(index, _)| *index);
    indexed
        .into_iter()
        .map(|(_, snapshot)| snapshot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Fake resolver with canned answers per DNS name. Names not present
    /// in `answers` fail resolution; names in `slow` sleep first.
    #[derive(Default)]
    struct FakeResolver {
        answers: HashMap<String, Vec<String>>,
        slow: HashMap<String, Duration>,
    }

    impl FakeResolver {
        fn with_answers(entries: &[(&str, &[&str])]) -> Self {
            let answers = entries
                .iter()
                .map(|(name, values)| {
                    (
                        name.to_string(),
                        values.iter().map(|v| v.to_string()).collect(),
                    )
                })
                .collect();
            FakeResolver {
                answers,
                slow: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl TxtLookup for FakeResolver {
        async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
            if let Some(delay) = self.slow.get(name) {
                tokio::time::sleep(*delay).await;
            }
            match self.answers.get(name) {
                Some(answers) => Ok(answers.clone()),
                None => Err(LookupError::Resolution(format!("no records found for {name}"))),
            }
        }
    }

    fn query(domain: &str, selector: &str) -> DomainQuery {
        DomainQuery {
            domain: domain.to_string(),
            selector: selector.to_string(),
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn all_lookups_succeeding_yield_matching_counts_and_payloads() {
        let resolver = FakeResolver::with_answers(&[
            ("_dmarc.example.com", &["\"v=DMARC1; p=reject\""]),
            (
                "example.com",
                &[
                    "\"v=spf1 include:_spf.example.com ~all\"",
                    "\"some-site-verification=abc\"",
                ],
            ),
            (
                "mail._domainkey.example.com",
                &["\"v=DKIM1; k=rsa; p=MIGf\""],
            ),
        ]);
        let stats = ProcessingStats::new();

        let snapshot =
            query_domain(&resolver, &stats, &query("example.com", "mail"), TIMEOUT).await;

        assert_eq!(snapshot.domain, "example.com");
        assert_eq!(snapshot.dmarc.count, 1);
        assert_eq!(snapshot.dmarc.values, vec!["v=DMARC1; p=reject"]);
        // The verification record does not carry the SPF marker
        assert_eq!(snapshot.spf.count, 1);
        assert_eq!(
            snapshot.spf.values,
            vec!["v=spf1 include:_spf.example.com ~all"]
        );
        assert_eq!(snapshot.dkim.count, 1);
        assert_eq!(snapshot.dkim.values, vec!["v=DKIM1; k=rsa; p=MIGf"]);
        assert_eq!(stats.total_errors(), 0);
    }

    #[tokio::test]
    async fn failed_lookups_become_diagnostics_without_affecting_others() {
        // Only DMARC resolves; SPF and DKIM fail independently.
        let resolver = FakeResolver::with_answers(&[(
            "_dmarc.example.com",
            &["\"v=DMARC1; p=reject\""] as &[&str],
        )]);
        let stats = ProcessingStats::new();

        let snapshot =
            query_domain(&resolver, &stats, &query("example.com", "mail"), TIMEOUT).await;

        assert_eq!(snapshot.dmarc.values, vec!["v=DMARC1; p=reject"]);
        assert_eq!(snapshot.spf.count, 1);
        assert_eq!(
            snapshot.spf.values,
            vec!["Unable to get SPF record for \"example.com\""]
        );
        assert_eq!(snapshot.dkim.count, 1);
        assert_eq!(
            snapshot.dkim.values,
            vec!["Unable to get DKIM record for \"example.com\" with selector \"mail\""]
        );
        assert_eq!(stats.get_error_count(ErrorType::SpfLookupError), 1);
        assert_eq!(stats.get_error_count(ErrorType::DkimLookupError), 1);
        assert_eq!(stats.get_error_count(ErrorType::DmarcLookupError), 0);
    }

    #[tokio::test]
    async fn answers_without_marker_yield_empty_record_set() {
        let resolver = FakeResolver::with_answers(&[(
            "example.com",
            &["\"some-site-verification=abc\""] as &[&str],
        )]);
        let stats = ProcessingStats::new();

        let snapshot = query_domain(&resolver, &stats, &query("example.com", ""), TIMEOUT).await;

        // The lookup succeeded, so no diagnostic; just zero matching records.
        assert_eq!(snapshot.spf.count, 0);
        assert!(snapshot.spf.values.is_empty());
        assert_eq!(stats.get_error_count(ErrorType::SpfLookupError), 0);
    }

    #[tokio::test]
    async fn multiple_matching_answers_keep_resolver_order() {
        let resolver = FakeResolver::with_answers(&[(
            "example.com",
            &["\"v=spf1 mx -all\"", "\"v=spf1 a -all\""] as &[&str],
        )]);
        let stats = ProcessingStats::new();

        let snapshot = query_domain(&resolver, &stats, &query("example.com", ""), TIMEOUT).await;

        assert_eq!(snapshot.spf.count, 2);
        assert_eq!(snapshot.spf.values, vec!["v=spf1 mx -all", "v=spf1 a -all"]);
    }

    #[tokio::test]
    async fn unquoted_answer_is_surfaced_verbatim() {
        let resolver = FakeResolver::with_answers(&[(
            "example.com",
            &["v=spf1 include:mailer.example.net -all"] as &[&str],
        )]);
        let stats = ProcessingStats::new();

        let snapshot = query_domain(&resolver, &stats, &query("example.com", ""), TIMEOUT).await;

        assert_eq!(
            snapshot.spf.values,
            vec!["v=spf1 include:mailer.example.net -all"]
        );
    }

    #[tokio::test]
    async fn slow_lookup_times_out_into_diagnostic() {
        let mut resolver = FakeResolver::with_answers(&[(
            "example.com",
            &["\"v=spf1 -all\""] as &[&str],
        )]);
        resolver
            .slow
            .insert("example.com".to_string(), Duration::from_secs(2));
        let stats = ProcessingStats::new();

        let snapshot = query_domain(
            &resolver,
            &stats,
            &query("example.com", ""),
            Duration::from_millis(20),
        )
        .await;

        assert_eq!(
            snapshot.spf.values,
            vec!["Unable to get SPF record for \"example.com\""]
        );
        assert_eq!(stats.get_error_count(ErrorType::SpfLookupError), 1);
    }

    #[tokio::test]
    async fn run_queries_restores_input_order() {
        // The first domain is slow, so its task finishes last; output must
        // still follow input order.
        let mut resolver = FakeResolver::with_answers(&[
            ("_dmarc.slow.example", &["\"v=DMARC1; p=none\""] as &[&str]),
            ("_dmarc.fast.example", &["\"v=DMARC1; p=reject\""]),
        ]);
        resolver
            .slow
            .insert("_dmarc.slow.example".to_string(), Duration::from_millis(100));

        let queries = vec![query("slow.example", ""), query("fast.example", "")];
        let snapshots = run_queries(
            Arc::new(resolver),
            Arc::new(ProcessingStats::new()),
            &queries,
            8,
            TIMEOUT,
            Arc::new(AtomicUsize::new(0)),
        )
        .await;

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].domain, "slow.example");
        assert_eq!(snapshots[1].domain, "fast.example");
    }

    #[tokio::test]
    async fn duplicate_domains_produce_independent_snapshots() {
        let resolver = FakeResolver::with_answers(&[(
            "_dmarc.example.com",
            &["\"v=DMARC1; p=none\""] as &[&str],
        )]);

        let queries = vec![query("example.com", "a"), query("example.com", "b")];
        let completed = Arc::new(AtomicUsize::new(0));
        let snapshots = run_queries(
            Arc::new(resolver),
            Arc::new(ProcessingStats::new()),
            &queries,
            2,
            TIMEOUT,
            Arc::clone(&completed),
        )
        .await;

        assert_eq!(snapshots.len(), 2);
        assert_eq!(completed.load(Ordering::SeqCst), 2);
        // Different selectors produce different DKIM diagnostics.
        assert_ne!(snapshots[0].dkim, snapshots[1].dkim);
    }
}
