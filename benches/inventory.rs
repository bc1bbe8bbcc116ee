use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use phonoscope::{
    Assessment, CaseOrdering, ClusterInferenceEngine, ClusterSplitPolicy, InventorySimulator,
    KnownCase, Phoneme, Position, ReferenceTables, ReplayOrder, TargetPhonemes,
    TranscriptionParser, WordRanking,
};

const WORDS: usize = 100;

const SYMBOLS: [&str; 12] = ["p", "b", "t", "d", "k", "g", "f", "v", "s", "z", "l", "ɲ"];
const CLUSTERS: [&str; 6] = ["pɾ", "bl", "tɾ", "kl", "fɾ", "gl"];

// Deterministic synthetic instrument: each word gets two consonants and,
// every third word, a cluster onset.
fn make_fixture() -> (Arc<ReferenceTables>, Assessment) {
    let words: Vec<String> = (0..WORDS).map(|i| format!("word{i}")).collect();
    let mut targets = TargetPhonemes::new();
    let mut assessment = Assessment::new();

    for (i, word) in words.iter().enumerate() {
        let mut phonemes = vec![
            Phoneme::new(SYMBOLS[i % SYMBOLS.len()], Position::InitialOnset).unwrap(),
            Phoneme::new(SYMBOLS[(i * 7) % SYMBOLS.len()], Position::MedialOnset).unwrap(),
        ];
        if i % 3 == 0 {
            phonemes.push(
                Phoneme::new(CLUSTERS[i % CLUSTERS.len()], Position::InitialComplexOnset).unwrap(),
            );
        }
        targets.insert(word.as_str(), phonemes.clone()).unwrap();
        assessment.insert(KnownCase::new(word.as_str(), "", i % 4 != 0, phonemes).unwrap());
    }

    let reference = ReferenceTables::new(WordRanking::new(words).unwrap(), targets);
    (Arc::new(reference), assessment)
}

fn bench_simulation(c: &mut Criterion) {
    let (reference, assessment) = make_fixture();
    let simulator = InventorySimulator::new(reference);

    let mut group = c.benchmark_group("simulation");
    group.throughput(Throughput::Elements(assessment.len() as u64));
    for ordering in [CaseOrdering::EasyFirst, CaseOrdering::TreeOrder, CaseOrdering::Interleaved] {
        let order = ReplayOrder::from(ordering);
        group.bench_function(ordering.name(), |b| {
            b.iter(|| {
                simulator.run(
                    black_box(&assessment),
                    Some(&order),
                    2,
                    ClusterSplitPolicy::Split,
                )
            });
        });
    }
    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let (reference, assessment) = make_fixture();
    let tree = reference.tree();

    c.bench_function("tree/build_sequence_order", |b| {
        b.iter(|| tree.build_sequence_order(black_box(assessment.cases())));
    });
    c.bench_function("tree/first_words", |b| {
        b.iter(|| tree.first_words(black_box(assessment.cases())));
    });
}

fn bench_inference(c: &mut Criterion) {
    let (reference, assessment) = make_fixture();
    let engine = ClusterInferenceEngine::new(reference);

    c.bench_function("inference/producible", |b| {
        b.iter(|| engine.infer_producible(black_box(&assessment)).unwrap());
    });
    c.bench_function("inference/not_producible", |b| {
        b.iter(|| engine.infer_not_producible(black_box(&assessment)).unwrap());
    });
}

fn bench_parser(c: &mut Criterion) {
    let parser = TranscriptionParser::new().unwrap();
    c.bench_function("transcription/parse", |b| {
        b.iter(|| parser.parse(black_box("[ba.χi.'gui.ɲə]")));
    });
}

criterion_group!(
    benches,
    bench_simulation,
    bench_traversal,
    bench_inference,
    bench_parser
);
criterion_main!(benches);
