use criterion::{Criterion, criterion_group, criterion_main};
use outline_weights_config::{DialectName, WeightsConfig};
use outline_weights_engine::weights::mode;
use outline_weights_engine::{Cmd, Document, Editor};
mod common;

fn editor(content: &str) -> Editor {
    Editor::new(Document::from_bytes(content.as_bytes()).unwrap())
}

fn bench_activation(c: &mut Criterion) {
    let mut group = c.benchmark_group("activation");
    group.sample_size(10);

    let content = common::generate_outline(50, 4);
    let config = WeightsConfig::default();

    for dialect in [DialectName::Org, DialectName::OrgScan] {
        group.bench_function(format!("enable_{:?}", dialect), |b| {
            let mut ed = editor(&content);
            b.iter(|| {
                mode::enable(std::hint::black_box(&mut ed), dialect, &config);
            });
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    group.sample_size(10);

    let content = common::generate_outline(50, 4);
    let config = WeightsConfig::default();

    group.bench_function("insert_and_delete_in_body", |b| {
        let mut ed = editor(&content);
        mode::enable(&mut ed, DialectName::Org, &config);
        let at = content.len() / 2;
        let at = ed.document().line_start(at);
        b.iter(|| {
            ed.apply(Cmd::InsertText {
                at,
                text: "new paragraph\n\n".to_string(),
            });
            ed.apply(Cmd::DeleteRange {
                range: at..at + 15,
            });
            std::hint::black_box(ed.decorations());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_activation, bench_reconcile);
criterion_main!(benches);
