//! End-to-end checks: CSV in, ensemble trained, predictions out.

use approx::assert_abs_diff_eq;
use polyclass::core::{PolyclassError, PolyclassResult};
use polyclass::data::{ClassAttribute, Header, Instance, Instances};
use polyclass::io::{instances_from_reader, load_model, read_instances, save_model};
use polyclass::meta::{
    ClassPrior, DistributionClassifier, Learner, Method, MultiClassClassifier, MultiClassConfig,
    TrainedModel,
};
use serde::{Deserialize, Serialize};

/// Two-class nearest-centroid learner with hard votes.
struct CentroidLearner;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Centroids {
    centers: Vec<Option<Vec<f64>>>,
}

fn sq_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl Learner for CentroidLearner {
    type Model = Centroids;

    fn fit(&self, data: &Instances) -> PolyclassResult<Centroids> {
        if data.num_classes() != 2 {
            return Err(PolyclassError::Training("centroid learner is two-class only".into()));
        }
        let mut sums = vec![vec![0.0; data.num_features()]; 2];
        let mut counts = [0usize; 2];
        for inst in data {
            if let Some(c) = inst.class {
                counts[c] += 1;
                for (s, x) in sums[c].iter_mut().zip(&inst.features) {
                    *s += x;
                }
            }
        }
        let centers = sums
            .into_iter()
            .zip(counts)
            .map(|(s, n)| (n > 0).then(|| s.iter().map(|v| v / n as f64).collect()))
            .collect();
        Ok(Centroids { centers })
    }

    fn name(&self) -> &str {
        "centroid"
    }
}

impl DistributionClassifier for Centroids {
    fn distribution(&self, instance: &Instance) -> PolyclassResult<Vec<f64>> {
        let d: Vec<f64> = self
            .centers
            .iter()
            .map(|c| c.as_ref().map_or(f64::INFINITY, |c| sq_dist(c, &instance.features)))
            .collect();
        Ok(if d[0] < d[1] {
            vec![1.0, 0.0]
        } else if d[1] < d[0] {
            vec![0.0, 1.0]
        } else {
            vec![0.5, 0.5]
        })
    }

    fn report(&self) -> String {
        "nearest centroid".to_string()
    }
}

const CORNERS: &str = "\
x,y,corner
-0.5,0,origin
0.5,0,origin
0,-0.5,origin
0,0.5,origin
9.5,0,east
10.5,0,east
10,-0.5,east
10,0.5,east
-0.5,10,north
0.5,10,north
0,9.5,north
0,10.5,north
";

fn corners() -> Instances {
    instances_from_reader(CORNERS.as_bytes(), "corners").unwrap()
}

fn train(method: Method) -> MultiClassClassifier<CentroidLearner> {
    let cfg = MultiClassConfig::new(method).with_seed(11);
    let mut clf = MultiClassClassifier::with_base(cfg, CentroidLearner);
    clf.train(&corners()).unwrap();
    clf
}

fn probes() -> Vec<(Instance, usize)> {
    // class indices follow the sorted value order: east, north, origin
    vec![
        (Instance::unlabeled(vec![10.0, 0.0]), 0),
        (Instance::unlabeled(vec![0.0, 10.0]), 1),
        (Instance::unlabeled(vec![0.0, 0.0]), 2),
    ]
}

#[test]
fn test_class_values_are_sorted() {
    let data = corners();
    assert_eq!(data.header().class.values(), &["east", "north", "origin"]);
    assert_eq!(data.class_counts(), vec![4, 4, 4]);
}

#[test]
fn test_deterministic_methods_recover_every_class() {
    for method in [Method::OneVsAll, Method::ExhaustiveCode, Method::OneVsOne] {
        let clf = train(method);
        for (probe, expected) in probes() {
            assert_eq!(clf.classify(&probe).unwrap(), expected, "{method} on {:?}", probe.features);
        }
    }
}

#[test]
fn test_one_vs_one_distribution() {
    let clf = train(Method::OneVsOne);
    let dist = clf.distribution(&Instance::unlabeled(vec![0.0, 10.0])).unwrap();
    // north wins both of its pairs, origin is nearer than east
    assert_abs_diff_eq!(dist[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(dist[1], 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(dist[2], 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_one_vs_all_distribution() {
    let clf = train(Method::OneVsAll);
    let dist = clf.distribution(&Instance::unlabeled(vec![10.0, 0.0])).unwrap();
    // votes [3, 1, 1]
    assert_abs_diff_eq!(dist[0], 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(dist[1], 0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(dist[2], 0.2, epsilon = 1e-12);
}

#[test]
fn test_random_code_is_normalized_and_reproducible() {
    let a = train(Method::RandomCode);
    let b = train(Method::RandomCode);
    assert_eq!(a.model().unwrap().code(), b.model().unwrap().code());
    assert_eq!(a.model().unwrap().num_members(), 6);

    let data = corners();
    let first = a.distributions(&data).unwrap();
    assert_eq!(first, b.distributions(&data).unwrap());
    for dist in first {
        assert_eq!(dist.len(), 3);
        assert_abs_diff_eq!(dist.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_parallel_scoring_matches_serial() {
    for method in Method::ALL {
        let serial = train(method);
        let cfg = MultiClassConfig::new(method).with_seed(11).with_parallel(true);
        let mut parallel = MultiClassClassifier::with_base(cfg, CentroidLearner);
        parallel.train(&corners()).unwrap();

        let data = corners();
        assert_eq!(serial.distributions(&data).unwrap(), parallel.distributions(&data).unwrap());
    }
}

#[test]
fn test_binary_problem_uses_base_directly() {
    let class = ClassAttribute::new("side", vec!["left".into(), "right".into()]).unwrap();
    let header = Header::new("line", vec!["x".into()], class);
    let rows = vec![
        Instance::new(vec![-1.0], 0),
        Instance::new(vec![-2.0], 0),
        Instance::new(vec![1.0], 1),
        Instance::new(vec![2.0], 1),
    ];
    let data = Instances::new(header, rows).unwrap();

    for method in Method::ALL {
        let mut clf = MultiClassClassifier::with_base(MultiClassConfig::new(method), CentroidLearner);
        clf.train(&data).unwrap();
        let model = clf.model().unwrap();
        assert_eq!(model.num_members(), 1);
        assert!(model.code().is_none());
        assert!(model.pairs().is_none());
        assert_eq!(clf.distribution(&Instance::unlabeled(vec![1.5])).unwrap(), vec![0.0, 1.0]);
    }
}

#[test]
fn test_report_lists_members() {
    let clf = train(Method::OneVsOne);
    let report = clf.to_string();
    assert!(report.starts_with("MultiClassClassifier\n\n"));
    assert!(report.contains("Classifier 1, 1 vs 2\nnearest centroid"));
    assert!(report.contains("Classifier 3, 2 vs 3\nnearest centroid"));

    let clf = train(Method::OneVsAll);
    assert!(clf.to_string().contains("Classifier 2, using indicator values: 2\n"));
}

#[test]
fn test_csv_to_saved_model() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("corners.csv");
    std::fs::write(&csv, CORNERS).unwrap();
    let data = read_instances(&csv).unwrap();

    let cfg = MultiClassConfig::new(Method::ExhaustiveCode);
    let mut clf = MultiClassClassifier::with_base(cfg, CentroidLearner);
    clf.train(&data).unwrap();
    let model = clf.into_model().unwrap();

    let path = dir.path().join("model.json");
    save_model(&model, &path).unwrap();
    let loaded: TrainedModel<Centroids, ClassPrior> = load_model(&path).unwrap();

    for inst in &data {
        assert_eq!(loaded.distribution(inst).unwrap(), model.distribution(inst).unwrap());
    }
    assert_eq!(loaded.report(), model.report());
}
