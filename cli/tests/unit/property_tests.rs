//! Property-based tests for check evaluation invariants.

use proptest::prelude::*;
use stanza_manifest::{FileExpectation, FileKind, FileMode, PlatformFamily};
use stanza_verify::domain::{
    Attribute, AttributePolicy, FileFacts, FileProbe, Platform, ServiceFacts, ServiceProbe,
    evaluate_file, evaluate_service,
};

use crate::helpers::stanza_service;

fn kind_strategy() -> impl Strategy<Value = FileKind> {
    prop_oneof![
        Just(FileKind::File),
        Just(FileKind::Directory),
        Just(FileKind::Symlink),
    ]
}

fn expectation_strategy() -> impl Strategy<Value = FileExpectation> {
    (
        kind_strategy(),
        proptest::option::of(0u32..=0o7777),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(kind, mode, owner, group)| FileExpectation {
            path: "/opt/observiq/stanza/x".into(),
            kind,
            mode: mode.map(FileMode::from_bits),
            owner,
            group,
            skip_on_major_versions: Vec::new(),
        })
}

proptest! {
    /// `exists` is always reported first, exactly once.
    #[test]
    fn prop_exists_first(expect in expectation_strategy(), missing in any::<bool>()) {
        let probe = if missing {
            FileProbe::Missing
        } else {
            FileProbe::Found(FileFacts { kind: FileKind::File, mode: None, owner: None, group: None })
        };
        let results = evaluate_file(&expect, &probe, AttributePolicy::Full);
        prop_assert_eq!(results[0].attribute, Attribute::Exists);
        prop_assert_eq!(results.iter().filter(|r| r.attribute == Attribute::Exists).count(), 1);
    }

    /// A missing path fails every result it produces.
    #[test]
    fn prop_missing_fails_everything(expect in expectation_strategy()) {
        let results = evaluate_file(&expect, &FileProbe::Missing, AttributePolicy::Full);
        prop_assert!(results.iter().all(|r| r.is_failed()));
    }

    /// Facts that mirror the expectation always pass.
    #[test]
    fn prop_matching_facts_pass(expect in expectation_strategy()) {
        let probe = FileProbe::Found(FileFacts {
            kind: expect.kind,
            mode: Some(expect.mode.unwrap_or(FileMode::from_bits(0o644))),
            owner: Some(expect.owner.clone().unwrap_or_else(|| "root".into())),
            group: Some(expect.group.clone().unwrap_or_else(|| "root".into())),
        });
        let results = evaluate_file(&expect, &probe, AttributePolicy::Full);
        prop_assert!(results.iter().all(|r| !r.is_failed()));
    }

    /// Existence-only policy yields a single result whatever is declared.
    #[test]
    fn prop_existence_only_single_result(expect in expectation_strategy(), missing in any::<bool>()) {
        let probe = if missing {
            FileProbe::Missing
        } else {
            FileProbe::Found(FileFacts { kind: FileKind::Directory, mode: None, owner: None, group: None })
        };
        let results = evaluate_file(&expect, &probe, AttributePolicy::ExistenceOnly);
        prop_assert_eq!(results.len(), 1);
        prop_assert_eq!(results[0].is_failed(), missing);
    }

    /// Service evaluation always yields installed, enabled, running in order.
    #[test]
    fn prop_service_results_fixed_order(
        installed in any::<bool>(),
        enabled in any::<bool>(),
        running in any::<bool>(),
        major in 5u32..12,
    ) {
        let platform = Platform::new(PlatformFamily::Linux).with_release(format!("{major}.0"));
        let probe = ServiceProbe::Queried(ServiceFacts { installed, enabled, running });
        let results = evaluate_service(&stanza_service(&[6]), &probe, &platform);
        let attrs: Vec<Attribute> = results.iter().map(|r| r.attribute).collect();
        prop_assert_eq!(attrs, vec![Attribute::Installed, Attribute::Enabled, Attribute::Running]);
        if major == 6 {
            prop_assert!(results.iter().all(|r| !r.is_failed()));
        } else {
            let failed = results.iter().filter(|r| r.is_failed()).count();
            let expected = [installed, enabled, running].iter().filter(|s| !**s).count();
            prop_assert_eq!(failed, expected);
        }
    }
}
