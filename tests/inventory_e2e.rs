use std::sync::Arc;

use phonoscope::simulation::case_frequencies;
use phonoscope::{
    Assessment, CaseOrdering, ClusterSplitPolicy, EngineConfig, InventorySimulator, KnownCase,
    Phoneme, Position, ReferenceTables, ReplayOrder, TargetPhonemes, WordRanking,
};

fn ph(symbol: &str, position: Position) -> Phoneme {
    Phoneme::new(symbol, position).unwrap()
}

fn reference(words: &[&str]) -> Arc<ReferenceTables> {
    Arc::new(
        ReferenceTables::builder()
            .ranking(WordRanking::new(words.iter().copied()).unwrap())
            .targets(TargetPhonemes::new())
            .build()
            .unwrap(),
    )
}

fn five_word_assessment() -> Assessment {
    use Position::{InitialOnset as IO, MedialOnset as MO};
    // Inserted out of ranking order on purpose.
    Assessment::from_cases([
        KnownCase::new(
            "word35",
            "",
            true,
            vec![ph("k", IO), ph("b", MO), ph("l", MO), ph("ɾ", MO)],
        )
        .unwrap(),
        KnownCase::new("Gato", "", true, vec![ph("g", IO), ph("t", MO)]).unwrap(),
        KnownCase::new("Anel", "", true, vec![ph("n", MO)]).unwrap(),
        KnownCase::new("Chinelo", "", true, vec![ph("ʃ", IO), ph("n", MO), ph("l", MO)]).unwrap(),
        KnownCase::new("Cabelo", "", true, vec![ph("k", IO), ph("b", MO), ph("l", MO)]).unwrap(),
    ])
}

const RANKING: [&str; 5] = ["Anel", "Cabelo", "Gato", "Chinelo", "word35"];

#[test]
fn easy_first_replay_selects_every_contributing_word() {
    let simulator = InventorySimulator::new(reference(&RANKING));
    let assessment = five_word_assessment();
    let order = ReplayOrder::from(CaseOrdering::EasyFirst);

    let result = simulator.run(&assessment, Some(&order), 1, ClusterSplitPolicy::Split);

    assert_eq!(
        result.required_words,
        vec!["Anel", "Cabelo", "Gato", "Chinelo", "word35"]
    );
    assert_eq!(result.count_of(&ph("n", Position::MedialOnset)), 2);
    assert_eq!(result.count_of(&ph("l", Position::MedialOnset)), 3);
    assert_eq!(result.count_of(&ph("ɾ", Position::MedialOnset)), 1);
    assert_eq!(result.source_assessment, assessment.id());
    assert_eq!(result.ordering_used, Some(order));
}

#[test]
fn rerunning_a_simulation_is_idempotent() {
    let simulator = InventorySimulator::new(reference(&RANKING));
    let assessment = five_word_assessment();

    for ordering in [
        CaseOrdering::EasyFirst,
        CaseOrdering::HardFirst,
        CaseOrdering::TreeOrder,
        CaseOrdering::Interleaved,
    ] {
        let order = ReplayOrder::from(ordering);
        let first = simulator.run(&assessment, Some(&order), 2, ClusterSplitPolicy::Split);
        let second = simulator.run(&assessment, Some(&order), 2, ClusterSplitPolicy::Split);
        assert_eq!(first, second, "ordering {}", ordering.name());
        assert_eq!(first.required_words, second.required_words);
    }
}

#[test]
fn counts_are_bounded_by_case_frequency_and_reach_threshold() {
    let simulator = InventorySimulator::new(reference(&RANKING));
    let assessment = five_word_assessment();
    let frequencies = case_frequencies(&assessment, ClusterSplitPolicy::Split);

    for threshold in 1..=3 {
        let result = simulator.run(
            &assessment,
            Some(&CaseOrdering::HardFirst.into()),
            threshold,
            ClusterSplitPolicy::Split,
        );
        for (phoneme, count) in &result.observation_counts {
            assert!(*count <= frequencies[phoneme], "{phoneme} over-counted");
        }
        for (phoneme, frequency) in &frequencies {
            if *frequency >= threshold {
                assert!(result.count_of(phoneme) >= threshold, "{phoneme} under threshold");
            }
        }
    }
}

#[test]
fn hard_first_needs_fewer_words_for_the_same_inventory() {
    let simulator = InventorySimulator::new(reference(&RANKING));
    let assessment = five_word_assessment();

    let result = simulator.run(
        &assessment,
        Some(&CaseOrdering::HardFirst.into()),
        1,
        ClusterSplitPolicy::Split,
    );

    // word35 covers k, b, l and ɾ; Cabelo then adds nothing.
    assert_eq!(result.required_words, vec!["word35", "Chinelo", "Gato"]);
    assert_eq!(result.count_of(&ph("l", Position::MedialOnset)), 3);
}

#[test]
fn adaptive_sequence_can_drive_an_explicit_replay() {
    let reference = reference(&RANKING);
    let simulator = InventorySimulator::new(Arc::clone(&reference));
    let assessment = five_word_assessment();

    let sequence = reference.tree().build_sequence_order(assessment.cases());
    assert_eq!(sequence.len(), assessment.len());
    assert_eq!(sequence.first().map(String::as_str), reference.tree().root_word());

    // All correct: Gato, then the harder half, then the easier half.
    assert_eq!(sequence, vec!["Gato", "Chinelo", "word35", "Anel", "Cabelo"]);

    let order = ReplayOrder::Explicit(sequence);
    let result = simulator.run(&assessment, Some(&order), 1, ClusterSplitPolicy::Split);
    assert_eq!(result.required_words, vec!["Gato", "Chinelo", "word35"]);
    assert_eq!(result.count_of(&ph("n", Position::MedialOnset)), 2);
}

#[test]
fn keeping_clusters_whole_counts_them_as_one_unit() {
    let simulator = InventorySimulator::new(reference(&["Prato", "Placa"]));
    let assessment = Assessment::from_cases([
        KnownCase::new(
            "Prato",
            "['pɾa.tu]",
            true,
            vec![ph("pɾ", Position::InitialComplexOnset), ph("t", Position::MedialOnset)],
        )
        .unwrap(),
        KnownCase::new(
            "Placa",
            "['pla.kɐ]",
            true,
            vec![ph("pl", Position::InitialComplexOnset), ph("k", Position::MedialOnset)],
        )
        .unwrap(),
    ]);

    let config = EngineConfig {
        split_consonant_clusters: false,
        ..EngineConfig::default()
    };
    let whole = simulator.run_with_config(&assessment, &config);
    assert_eq!(whole.count_of(&ph("pɾ", Position::InitialComplexOnset)), 1);
    assert_eq!(whole.count_of(&ph("p", Position::InitialComplexOnset)), 0);

    let split = simulator.run_with_config(&assessment, &EngineConfig::default());
    assert_eq!(split.count_of(&ph("p", Position::InitialComplexOnset)), 2);
    assert_eq!(split.count_of(&ph("ɾ", Position::InitialComplexOnset)), 1);
    assert_eq!(split.count_of(&ph("l", Position::InitialComplexOnset)), 1);
}

#[test]
fn result_survives_a_json_round_trip() {
    let simulator = InventorySimulator::new(reference(&RANKING));
    let assessment = five_word_assessment();
    let result = simulator.run_with_config(&assessment, &EngineConfig::default());

    let json = serde_json::to_string(&result).unwrap();
    let back: phonoscope::SimulationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
