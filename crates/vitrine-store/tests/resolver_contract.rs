//! Contract tests for the resolution policy, end to end through the public API

use pretty_assertions::assert_eq;
use serde_json::json;
use vitrine_content::{
    BrandEntry, ContentType, JobPosting, LegalSection, PricingPlan, TeamMember, Testimonial,
};
use vitrine_store::{
    CategoryFilter, ContentFetcher, Fault, JsonDirFetcher, Origin, Resolver, StaticFetcher,
};
use vitrine_test_utils as fixtures;

#[tokio::test]
async fn empty_jobs_collection_resolves_empty() {
    // jobs deliberately have no fallback content
    let resolver = Resolver::new(StaticFetcher::new());
    let snapshot = resolver.resolve::<JobPosting>().await;

    assert!(snapshot.records.is_empty());
    assert_eq!(snapshot.origin, Origin::Defaults);
    assert!(snapshot.faults.is_empty());
}

#[tokio::test]
async fn empty_testimonials_resolve_to_exact_defaults() {
    let resolver = Resolver::new(StaticFetcher::new());
    let snapshot = resolver.resolve::<Testimonial>().await;

    let expected: Vec<Testimonial> = resolver
        .registry()
        .collection(ContentType::Testimonial)
        .unwrap()
        .iter()
        .map(|v| serde_json::from_value(v.clone()).unwrap())
        .collect();

    assert_eq!(snapshot.records, expected);
    assert_eq!(snapshot.origin, Origin::Defaults);
}

#[tokio::test]
async fn job_skills_normalize_from_both_encodings() {
    let fetcher = StaticFetcher::new();
    fetcher.insert_collection(ContentType::Job, fixtures::job_payloads());

    let resolver = Resolver::new(fetcher);
    let snapshot = resolver.resolve::<JobPosting>().await;

    let backend = &snapshot.records[0];
    assert_eq!(backend.skills.as_slice(), ["React", "Node", "SQL"]);
    assert_eq!(backend.responsibilities.as_slice(), ["Own services", "Review code"]);
    assert_eq!(backend.qualifications.as_slice(), ["3+ years"]);

    let designer = &snapshot.records[1];
    assert_eq!(designer.skills.as_slice(), ["Figma", "Prototyping"]);
}

#[tokio::test]
async fn unordered_remote_ids_come_back_ascending() {
    let fetcher = StaticFetcher::new();
    fetcher.insert_collection(ContentType::Brand, fixtures::unordered_brand_payloads());

    let resolver = Resolver::new(fetcher);
    let snapshot = resolver.resolve::<BrandEntry>().await;

    let ids: Vec<u64> = snapshot.records.iter().map(|b| b.id.raw()).collect();
    assert_eq!(ids, vec![10, 20, 30]);
    let names: Vec<&str> = snapshot.records.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn pricing_merge_carries_remote_price_and_default_icon() {
    let fetcher = StaticFetcher::new();
    fetcher.insert_collection(ContentType::Pricing, vec![fixtures::remote_growth_plan()]);

    let resolver = Resolver::new(fetcher);
    let snapshot = resolver.resolve::<PricingPlan>().await;
    assert_eq!(snapshot.origin, Origin::Merged);

    let growth = snapshot
        .records
        .iter()
        .find(|p| p.title == "Growth Plan")
        .unwrap();
    assert_eq!(growth.price, "$119");
    assert_eq!(growth.plan_name, "Growth+");
    assert!(growth.is_popular);
    assert_eq!(
        growth.features.as_slice(),
        ["Everything in Starter", "Unlimited seats"]
    );
    // the store never owns presentation fields
    assert_eq!(growth.icon, "chart");
    assert_eq!(growth.accent, "indigo");

    // untouched defaults stay whole
    let starter = &snapshot.records[0];
    assert_eq!(starter.price, "$29");
    assert!(!starter.is_popular);
}

#[tokio::test]
async fn category_filter_never_leaks_other_categories() {
    let fetcher = StaticFetcher::new();
    fetcher.insert_collection(ContentType::Faq, fixtures::mixed_faq_payloads());

    let resolver = Resolver::new(fetcher);
    let snapshot = resolver
        .resolve_filtered::<vitrine_content::FaqEntry>(&CategoryFilter::new("billing"))
        .await;

    assert_eq!(snapshot.records.len(), 2);
    assert!(snapshot
        .records
        .iter()
        .all(|f| f.group.eq_ignore_ascii_case("billing")));
}

#[tokio::test]
async fn transport_failure_is_invisible_except_for_the_fault() {
    let fetcher = StaticFetcher::new();
    fetcher.fail_everything();

    let resolver = Resolver::new(fetcher);
    let snapshot = resolver.resolve::<TeamMember>().await;

    // the page still gets content
    assert_eq!(snapshot.records.len(), 3);
    assert_eq!(snapshot.origin, Origin::Defaults);
    // the degradation stays observable
    assert!(matches!(snapshot.faults[0], Fault::Transport { .. }));
}

#[tokio::test]
async fn legal_sections_filter_by_document() {
    let resolver = Resolver::new(StaticFetcher::new());
    let snapshot = resolver
        .resolve_filtered::<LegalSection>(&CategoryFilter::new("privacy"))
        .await;

    assert_eq!(snapshot.records.len(), 2);
    assert!(snapshot.records.iter().all(|s| s.document == "privacy"));
}

#[tokio::test]
async fn dir_fetcher_feeds_the_resolver_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(fixtures::collection_file_name(ContentType::Job)),
        serde_json::to_string(&fixtures::job_payloads()).unwrap(),
    )
    .unwrap();

    let resolver = Resolver::new(JsonDirFetcher::new(dir.path()));
    let snapshot = resolver.resolve::<JobPosting>().await;

    assert_eq!(snapshot.origin, Origin::Remote);
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.records[0].skills.as_slice(), ["React", "Node", "SQL"]);
}

#[tokio::test]
async fn dir_fetcher_decode_failure_degrades_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("testimonial.json"), "{not json").unwrap();

    let fetcher = JsonDirFetcher::new(dir.path());
    // the fetcher itself raises
    assert!(fetcher
        .fetch_collection(ContentType::Testimonial)
        .await
        .is_err());

    // the resolver absorbs it
    let resolver = Resolver::new(fetcher);
    let snapshot = resolver.resolve::<Testimonial>().await;
    assert_eq!(snapshot.origin, Origin::Defaults);
    assert_eq!(snapshot.records.len(), 3);
    assert!(snapshot.is_degraded());
}

#[tokio::test]
async fn team_member_socials_hoist_through_resolution() {
    let fetcher = StaticFetcher::new();
    fetcher.insert_collection(
        ContentType::TeamMember,
        vec![json!({
            "id": 1,
            "name": "Ada",
            "social_links": r#"{"linkedin":"https://li/ada","twitter":"https://tw/ada"}"#
        })],
    );

    let resolver = Resolver::new(fetcher);
    let snapshot = resolver.resolve::<TeamMember>().await;

    let ada = &snapshot.records[0];
    assert_eq!(ada.linkedin.as_deref(), Some("https://li/ada"));
    assert_eq!(ada.twitter.as_deref(), Some("https://tw/ada"));
    assert_eq!(ada.github, None);
}
