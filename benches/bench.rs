// Criterion benchmarks for Benefit Matcher

use benefit_matcher::core::{
    calculate_quality_score, dedupe, process_extracted, reconcile, scoring::calculate_match_score,
    Catalog, Selector,
};
use benefit_matcher::models::{
    AgeBracket, Category, ExternalRank, ExtractedBenefit, IncomeBracket, Presence, Region,
    ScoringPoints, TargetGroups, UserProfile,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_profile() -> UserProfile {
    UserProfile {
        age: Some(AgeBracket::Twenties),
        region: Some(Region::Seoul),
        income: Some(IncomeBracket::Median80OrLess),
        has_children: Some(Presence::No),
        support_parents: Some(Presence::No),
        interests: [Category::Housing, Category::EducationEmployment].into_iter().collect(),
        ..Default::default()
    }
}

fn create_extracted(id: usize) -> ExtractedBenefit {
    ExtractedBenefit {
        id: String::new(),
        title: format!("청년 지원 사업 {}", id),
        category: "교육/취업".to_string(),
        description: "미취업 청년에게 구직활동 지원금을 매월 지급합니다.".to_string(),
        difficulty: None,
        benefit: None,
        agency: "고용노동부".to_string(),
        eligibility: if id % 3 == 0 { String::new() } else { "만 18세 이상 34세 이하".to_string() },
        documents: vec!["신분증".to_string()],
        apply_url: "https://www.work.go.kr".to_string(),
        conditions: TargetGroups {
            age: Some(vec!["20대".to_string()]),
            ..Default::default()
        },
        source_url: None,
        extracted_at: None,
        is_new: true,
    }
}

fn bench_scoring(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let profile = create_profile();
    let points = ScoringPoints::default();
    let template = &catalog.templates()[0];

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(template), black_box(&profile), black_box(&points)));
    });
}

fn bench_selection(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let selector = Selector::with_defaults();
    let profile = create_profile();

    let mut group = c.benchmark_group("selection");

    for copies in [1, 5, 20].iter() {
        // Widen the builtin catalog with renamed copies
        let templates = (0..*copies)
            .flat_map(|copy| {
                catalog.templates().iter().cloned().map(move |mut template| {
                    template.id = format!("{}_{}", template.id, copy);
                    template
                })
            })
            .collect();
        let widened = Catalog::new(templates).expect("widened catalog");

        group.bench_with_input(BenchmarkId::new("select", widened.len()), &widened, |b, catalog| {
            b.iter(|| selector.select(black_box(catalog), black_box(&profile)));
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let local = Selector::with_defaults().select(&catalog, &create_profile()).benefits;
    let external: Vec<ExternalRank> = local
        .iter()
        .rev()
        .step_by(2)
        .map(|b| ExternalRank { id: b.id.clone(), reason: "추천".to_string() })
        .collect();

    c.bench_function("reconcile", |b| {
        b.iter(|| reconcile(black_box(local.clone()), black_box(Some(external.as_slice()))));
    });
}

fn bench_ingest(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let batch: Vec<ExtractedBenefit> = (0..200).map(create_extracted).collect();

    c.bench_function("quality_score", |b| {
        b.iter(|| calculate_quality_score(black_box(&batch[1])));
    });

    c.bench_function("dedupe_200_against_catalog", |b| {
        b.iter(|| dedupe(catalog.titles(), black_box(batch.clone())));
    });

    c.bench_function("process_extracted_200", |b| {
        b.iter(|| process_extracted(catalog.titles(), black_box(batch.clone())));
    });
}

criterion_group!(benches, bench_scoring, bench_selection, bench_reconcile, bench_ingest);

criterion_main!(benches);
