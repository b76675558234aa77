use criterion::{black_box, criterion_group, criterion_main, Criterion};
use promptvars::{AnswerSet, PromptBuilder, ResponseMode, VariableDraft, VariableKind};

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let mut builder = PromptBuilder::new();
    builder.set_template("Summarise %%doc%% for %%audience%% focusing on %%topics%%.");
    for (name, kind, mode) in [
        ("doc", VariableKind::Text, ResponseMode::FreeResponse),
        ("audience", VariableKind::Text, ResponseMode::SingleChoice),
        ("topics", VariableKind::Text, ResponseMode::MultiChoice),
    ] {
        let mut draft = VariableDraft::new(name, kind, "?").with_response_mode(mode);
        builder.add_variable(&mut draft).unwrap();
    }
    builder.set_answer("doc", "the Q3 report").unwrap();
    builder.set_answer("audience", "executives").unwrap();
    builder.set_answer("topics", vec!["costs", "risks"]).unwrap();

    group.bench_function("three_vars", |b| {
        b.iter(|| {
            let _ = black_box(&builder).render();
        })
    });

    // Large payload
    let mut large = PromptBuilder::new();
    let mut payload = String::new();
    for i in 0..100 {
        let name = format!("key_{}", i);
        payload.push_str(&format!("Key {}: %%{}%%\n", i, name));
        let mut draft = VariableDraft::new(name.clone(), VariableKind::Text, "?");
        large.add_variable(&mut draft).unwrap();
        large.set_answer(&name, format!("value_{}", i)).unwrap();
    }
    large.set_template(payload);

    group.bench_function("large_payload_100_vars", |b| {
        b.iter(|| {
            let _ = black_box(&large).render();
        })
    });

    group.bench_function("scan_100_vars", |b| {
        b.iter(|| {
            let _ = black_box(&large).scan();
        })
    });

    // No-op (Literal)
    let empty = AnswerSet::new();
    let plain = PromptBuilder::new();
    group.bench_function("literal_noop", |b| {
        b.iter(|| {
            let _ = promptvars::render(
                black_box("Just a plain string without placeholders"),
                plain.variables().as_slice(),
                &empty,
            );
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_render);
criterion_main!(benches);
