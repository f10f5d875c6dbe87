use polyclass_codes::{CodeKind, PairList};
use polyclass_core::{argmax, PolyclassError, PolyclassResult};
use polyclass_data::{ClassAttribute, ClassTransform, IndicatorFilter, Instance, Instances, PairFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

use crate::config::{Method, MultiClassConfig};
use crate::learner::Learner;
use crate::model::{map_jobs, Decomposition, Member, TrainedModel};
use crate::prior::PriorLearner;

/// Meta-classifier that handles multi-class problems with a binary
/// base learner.
///
/// Training splits the classes into binary sub-problems according to the
/// configured [`Method`], fits one base model per sub-problem and keeps a
/// fallback model trained on the full data. Prediction recombines the
/// sub-model outputs into a normalized distribution over all classes.
///
/// A classifier is trained at most once; build a new one to retrain.
pub struct MultiClassClassifier<L: Learner, P: Learner = PriorLearner> {
    config: MultiClassConfig,
    base: Option<L>,
    fallback: P,
    model: Option<TrainedModel<L::Model, P::Model>>,
}

impl<L: Learner> MultiClassClassifier<L, PriorLearner> {
    /// A classifier without a base learner. Call [`set_base`](Self::set_base)
    /// before training.
    pub fn new(config: MultiClassConfig) -> Self {
        MultiClassClassifier {
            config,
            base: None,
            fallback: PriorLearner,
            model: None,
        }
    }

    pub fn with_base(config: MultiClassConfig, base: L) -> Self {
        MultiClassClassifier {
            config,
            base: Some(base),
            fallback: PriorLearner,
            model: None,
        }
    }
}

impl<L: Learner, P: Learner> MultiClassClassifier<L, P> {
    /// Replace the fallback learner. Any trained model is discarded.
    pub fn with_fallback<Q: Learner>(self, fallback: Q) -> MultiClassClassifier<L, Q> {
        MultiClassClassifier {
            config: self.config,
            base: self.base,
            fallback,
            model: None,
        }
    }

    pub fn set_base(&mut self, base: L) {
        self.base = Some(base);
    }

    pub fn config(&self) -> &MultiClassConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&TrainedModel<L::Model, P::Model>> {
        self.model.as_ref()
    }

    pub fn into_model(self) -> Option<TrainedModel<L::Model, P::Model>> {
        self.model
    }

    pub fn train(&mut self, data: &Instances) -> PolyclassResult<()> {
        if self.model.is_some() {
            return Err(PolyclassError::AlreadyTrained);
        }
        let base = self.base.as_ref().ok_or(PolyclassError::NoBaseClassifier)?;
        self.config.validate()?;

        let fallback = self.fallback.fit(data)?;
        let num_classes = data.num_classes();
        let method = self.config.method;

        let decomposition = if num_classes <= 2 {
            Decomposition::Single(base.fit(data)?)
        } else {
            match method.code_kind(self.config.random_width_factor) {
                None => train_pairwise(base, data, self.config.parallel)?,
                Some(kind) => train_coded(base, data, kind, &self.config)?,
            }
        };

        let model = TrainedModel::new(method, data.header().class.clone(), decomposition, fallback);
        log::info!(
            "trained {} {} sub-classifier(s) for {} classes with {} ({} skipped)",
            model.num_members() - model.num_skipped(),
            base.name(),
            num_classes,
            method.description(),
            model.num_skipped()
        );
        self.model = Some(model);
        Ok(())
    }

    fn trained(&self) -> PolyclassResult<&TrainedModel<L::Model, P::Model>> {
        self.model.as_ref().ok_or(PolyclassError::NotTrained)
    }

    /// Class distribution for `instance`.
    pub fn distribution(&self, instance: &Instance) -> PolyclassResult<Vec<f64>> {
        self.trained()?.distribution_with(instance, self.config.parallel)
    }

    /// Most probable class index for `instance`.
    pub fn classify(&self, instance: &Instance) -> PolyclassResult<usize> {
        let dist = self.distribution(instance)?;
        argmax(&dist).ok_or_else(|| PolyclassError::Prediction("empty distribution".into()))
    }

    pub fn distributions(&self, data: &Instances) -> PolyclassResult<Vec<Vec<f64>>> {
        let model = self.trained()?;
        data.iter()
            .map(|inst| model.distribution_with(inst, self.config.parallel))
            .collect()
    }
}

fn train_pairwise<L: Learner>(
    base: &L,
    data: &Instances,
    parallel: bool,
) -> PolyclassResult<Decomposition<L::Model>> {
    let pairs = PairList::new(data.num_classes());
    let members = map_jobs(pairs.as_slice(), parallel, |&pair| {
        let filter = PairFilter::fit(data.header(), pair.first, pair.second)?;
        let subset = filter.transform(data)?;
        log::debug!("training {pair} on {} instances", subset.len());
        Ok(Member {
            problem: pair,
            classifier: Some(base.fit(&subset)?),
        })
    })?;
    Ok(Decomposition::Pairwise {
        pairs,
        two_class_header: data.header().with_class(ClassAttribute::pairwise()),
        members,
    })
}

fn train_coded<L: Learner>(
    base: &L,
    data: &Instances,
    kind: CodeKind,
    config: &MultiClassConfig,
) -> PolyclassResult<Decomposition<L::Model>> {
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let code = kind.generate(data.num_classes(), &mut rng)?;

    // one-vs-all rows line up with classes, so an empty class means an
    // empty positive side
    let counts = data.class_counts();
    let skip_empty = config.method == Method::OneVsAll;

    let rows: Vec<usize> = (0..code.num_rows()).collect();
    let members = map_jobs(&rows, config.parallel, |&row| {
        let filter = IndicatorFilter::fit(data.header(), code.row(row))?;
        if skip_empty && counts[row] == 0 {
            log::info!("skipping code row {} (no training examples)", row + 1);
            return Ok(Member {
                problem: filter,
                classifier: None,
            });
        }
        let subset = filter.transform(data)?;
        Ok(Member {
            problem: filter,
            classifier: Some(base.fit(&subset)?),
        })
    })?;
    Ok(Decomposition::Coded { code, members })
}

impl<L: Learner, P: Learner> fmt::Display for MultiClassClassifier<L, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.model {
            Some(model) => write!(f, "{model}"),
            None => write!(f, "MultiClassClassifier: No model built yet."),
        }
    }
}
