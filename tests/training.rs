use digit_net::data::mnist::{IMAGE_MAGIC, LABEL_MAGIC};
use digit_net::{
    data, evaluate, sgd, CostType, InitScheme, Network, Split, StopReason, TrainConfig,
    TrainingParameters,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Writes a tiny 2x2-pixel "digit" dataset: class 0 lights the left column,
/// class 1 the right column.
fn write_dataset(dir: &std::path::Path, split: Split, n: usize) {
    let (images_name, labels_name) = match split {
        Split::Train => ("train-images-idx3-ubyte", "train-labels-idx1-ubyte"),
        Split::Test => ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte"),
    };

    let mut images = Vec::new();
    images.extend_from_slice(&IMAGE_MAGIC.to_be_bytes());
    images.extend_from_slice(&(n as u32).to_be_bytes());
    images.extend_from_slice(&2u32.to_be_bytes());
    images.extend_from_slice(&2u32.to_be_bytes());

    let mut labels = Vec::new();
    labels.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
    labels.extend_from_slice(&(n as u32).to_be_bytes());

    for i in 0..n {
        let class = (i % 2) as u8;
        let pixels: [u8; 4] = if class == 0 { [255, 0, 230, 10] } else { [0, 255, 20, 240] };
        images.extend_from_slice(&pixels);
        labels.push(class);
    }

    std::fs::write(dir.join(images_name), images).unwrap();
    std::fs::write(dir.join(labels_name), labels).unwrap();
}

#[test]
fn trains_saves_and_reloads_a_classifier() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), Split::Train, 60);
    write_dataset(dir.path(), Split::Test, 20);

    let mut training = data::load(Split::Train, dir.path()).unwrap();
    let test = data::load(Split::Test, dir.path()).unwrap();
    assert_eq!(training[0].input.len(), 4);
    assert_eq!(training[0].target.len(), 10);

    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::new(&[4, 8, 10], InitScheme::Scaled, &mut rng).unwrap();
    let params = TrainingParameters {
        epochs: 40,
        batch_size: 7,
        learning_rate: 1.0,
        lambda: 0.1,
        cost: CostType::CrossEntropy,
        improvement_patience: 40,
    };

    let report = sgd(&mut network, &mut training, Some(&test), &TrainConfig::new(params), &mut rng).unwrap();
    assert_eq!(report.best_score, Some(20));
    assert!(report.epochs_run <= 40);
    assert!(report.history.iter().all(|s| s.batches == 9));

    let score = evaluate(&network, &test).unwrap();
    assert_eq!(score, 20);

    let model = dir.path().join("network.json");
    network.save_json(&model).unwrap();
    let reloaded = Network::load_json(&model).unwrap();
    assert_eq!(reloaded, network);
    assert_eq!(evaluate(&reloaded, &test).unwrap(), score);
}

#[test]
fn quadratic_cost_also_converges() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), Split::Train, 40);
    let mut training = data::load(Split::Train, dir.path()).unwrap();
    let held_out = training.split_off(30);

    let mut rng = StdRng::seed_from_u64(77);
    let mut network = Network::new(&[4, 6, 10], InitScheme::Scaled, &mut rng).unwrap();
    let params = TrainingParameters {
        epochs: 150,
        batch_size: 5,
        learning_rate: 3.0,
        lambda: 0.0,
        cost: CostType::Quadratic,
        improvement_patience: 150,
    };

    let report = sgd(&mut network, &mut training, Some(&held_out), &TrainConfig::new(params), &mut rng).unwrap();
    assert_eq!(report.stop_reason, StopReason::EpochsExhausted);
    assert_eq!(report.best_score, Some(10));
}

#[test]
fn same_seed_reproduces_training_exactly() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), Split::Train, 30);
    let data = data::load(Split::Train, dir.path()).unwrap();

    let run = || {
        let mut rng = StdRng::seed_from_u64(5);
        let mut network = Network::new(&[4, 5, 10], InitScheme::Scaled, &mut rng).unwrap();
        let mut training = data.clone();
        let params = TrainingParameters { epochs: 3, batch_size: 1, ..Default::default() };
        sgd(&mut network, &mut training, None, &TrainConfig::new(params), &mut rng).unwrap();
        network
    };

    // batch_size 1 makes every reduction a single term, so the result is
    // independent of how rayon splits the work.
    assert_eq!(run(), run());
}
