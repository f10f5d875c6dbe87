use polyclass_codes::{ClassPair, CodeMatrix, PairList};
use polyclass_core::{normalize, PolyclassError, PolyclassResult};
use polyclass_data::{restamp, ClassAttribute, ClassTransform, Header, IndicatorFilter, Instance};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Method;
use crate::learner::DistributionClassifier;

/// One sub-problem and its classifier.
///
/// `classifier` is `None` when the sub-problem was skipped because its
/// positive class had no training examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member<P, M> {
    pub problem: P,
    pub classifier: Option<M>,
}

impl<P, M> Member<P, M> {
    pub fn is_skipped(&self) -> bool {
        self.classifier.is_none()
    }
}

/// A sub-problem of a one-vs-one ensemble.
pub type PairMember<M> = Member<ClassPair, M>;

/// A sub-problem of a code-matrix ensemble.
pub type CodeMember<M> = Member<IndicatorFilter, M>;

/// How the trained ensemble is laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Decomposition<M> {
    /// Two classes or fewer: one classifier on the untouched data.
    Single(M),
    /// One member per class pair, combined by majority vote.
    Pairwise {
        pairs: PairList,
        two_class_header: Header,
        members: Vec<PairMember<M>>,
    },
    /// One member per code row, combined by soft decoding.
    Coded {
        code: CodeMatrix,
        members: Vec<CodeMember<M>>,
    },
}

/// Everything needed to reproduce predictions of a trained ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel<M, F> {
    num_classes: usize,
    method: Method,
    class_attribute: ClassAttribute,
    decomposition: Decomposition<M>,
    fallback: F,
}

impl<M, F> TrainedModel<M, F> {
    pub(crate) fn new(
        method: Method,
        class_attribute: ClassAttribute,
        decomposition: Decomposition<M>,
        fallback: F,
    ) -> Self {
        TrainedModel {
            num_classes: class_attribute.num_values(),
            method,
            class_attribute,
            decomposition,
            fallback,
        }
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn class_attribute(&self) -> &ClassAttribute {
        &self.class_attribute
    }

    pub fn decomposition(&self) -> &Decomposition<M> {
        &self.decomposition
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Number of classifier slots, skipped ones included.
    pub fn num_members(&self) -> usize {
        match &self.decomposition {
            Decomposition::Single(_) => 1,
            Decomposition::Pairwise { members, .. } => members.len(),
            Decomposition::Coded { members, .. } => members.len(),
        }
    }

    pub fn num_skipped(&self) -> usize {
        match &self.decomposition {
            Decomposition::Single(_) => 0,
            Decomposition::Pairwise { members, .. } => {
                members.iter().filter(|m| m.is_skipped()).count()
            }
            Decomposition::Coded { members, .. } => {
                members.iter().filter(|m| m.is_skipped()).count()
            }
        }
    }

    pub fn code(&self) -> Option<&CodeMatrix> {
        match &self.decomposition {
            Decomposition::Coded { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn pairs(&self) -> Option<&PairList> {
        match &self.decomposition {
            Decomposition::Pairwise { pairs, .. } => Some(pairs),
            _ => None,
        }
    }
}

impl<M, F> TrainedModel<M, F>
where
    M: DistributionClassifier + Sync,
    F: DistributionClassifier,
{
    /// Class distribution for `instance`, scoring members on the rayon pool
    /// when `parallel` is set. Member scores are added up in member order,
    /// so the result does not depend on `parallel`.
    pub fn distribution_with(
        &self,
        instance: &Instance,
        parallel: bool,
    ) -> PolyclassResult<Vec<f64>> {
        let mut acc = vec![0.0; self.num_classes];
        match &self.decomposition {
            Decomposition::Single(model) => return model.distribution(instance),
            Decomposition::Pairwise {
                two_class_header,
                members,
                ..
            } => {
                let scores =
                    map_jobs(members, parallel, |m| pair_score(two_class_header, m, instance))?;
                for (member, score) in members.iter().zip(scores) {
                    if let Some(s) = score {
                        add_pair_vote(&mut acc, member.problem, s);
                    }
                }
            }
            Decomposition::Coded { members, .. } => {
                let scores = map_jobs(members, parallel, |m| code_score(m, instance))?;
                for (member, score) in members.iter().zip(scores) {
                    if let Some(s) = score {
                        add_code_vote(&mut acc, &member.problem, s);
                    }
                }
            }
        }

        if normalize(&mut acc) {
            Ok(acc)
        } else {
            log::trace!("no sub-classifier voted; using the fallback distribution");
            self.fallback.distribution(instance)
        }
    }
}

impl<M, F> DistributionClassifier for TrainedModel<M, F>
where
    M: DistributionClassifier + Sync,
    F: DistributionClassifier,
{
    fn distribution(&self, instance: &Instance) -> PolyclassResult<Vec<f64>> {
        self.distribution_with(instance, false)
    }

    fn report(&self) -> String {
        self.to_string()
    }
}

/// Run `job` over `items` in order, serially or on the rayon pool.
pub(crate) fn map_jobs<T, R, G>(items: &[T], parallel: bool, job: G) -> PolyclassResult<Vec<R>>
where
    T: Sync,
    R: Send,
    G: Fn(&T) -> PolyclassResult<R> + Sync + Send,
{
    if parallel {
        items.par_iter().map(&job).collect()
    } else {
        items.iter().map(&job).collect()
    }
}

fn binary(dist: Vec<f64>) -> PolyclassResult<[f64; 2]> {
    match dist.as_slice() {
        &[p0, p1] => Ok([p0, p1]),
        other => Err(PolyclassError::Prediction(format!(
            "sub-classifier returned {} probabilities, expected 2",
            other.len()
        ))),
    }
}

/// `[p0, p1]` of a pair member for `instance`; `None` when skipped.
fn pair_score<M: DistributionClassifier>(
    header: &Header,
    member: &PairMember<M>,
    instance: &Instance,
) -> PolyclassResult<Option<[f64; 2]>> {
    let Some(classifier) = &member.classifier else {
        return Ok(None);
    };
    binary(classifier.distribution(&restamp(header, instance)?)?).map(Some)
}

/// One vote for the preferred class of the pair; nothing on a tie.
fn add_pair_vote(acc: &mut [f64], pair: ClassPair, [p0, p1]: [f64; 2]) {
    if p0 > p1 {
        acc[pair.first] += 1.0;
    } else if p1 > p0 {
        acc[pair.second] += 1.0;
    }
}

fn code_score<M: DistributionClassifier>(
    member: &CodeMember<M>,
    instance: &Instance,
) -> PolyclassResult<Option<[f64; 2]>> {
    let Some(classifier) = &member.classifier else {
        return Ok(None);
    };
    let sub = member.problem.transform_instance(instance)?;
    binary(classifier.distribution(&sub)?).map(Some)
}

/// Positive classes of the row receive `p1`, the others `p0`.
fn add_code_vote(acc: &mut [f64], row: &IndicatorFilter, [p0, p1]: [f64; 2]) {
    for (class, a) in acc.iter_mut().enumerate() {
        *a += if row.is_positive(class) { p1 } else { p0 };
    }
}

impl<M: DistributionClassifier, F> fmt::Display for TrainedModel<M, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MultiClassClassifier\n")?;
        match &self.decomposition {
            Decomposition::Single(model) => {
                writeln!(f, "Classifier 1")?;
                write!(f, "{}\n\n", model.report())?;
            }
            Decomposition::Pairwise { members, .. } => {
                for (i, m) in members.iter().enumerate() {
                    write_member(f, i, &format!(", {}", m.problem), m.classifier.as_ref())?;
                }
            }
            Decomposition::Coded { members, .. } => {
                for (i, m) in members.iter().enumerate() {
                    let label = format!(", using indicator values: {}", m.problem.value_range());
                    write_member(f, i, &label, m.classifier.as_ref())?;
                }
            }
        }
        Ok(())
    }
}

fn write_member<M: DistributionClassifier>(
    f: &mut fmt::Formatter<'_>,
    idx: usize,
    label: &str,
    classifier: Option<&M>,
) -> fmt::Result {
    write!(f, "Classifier {}", idx + 1)?;
    match classifier {
        Some(c) => write!(f, "{label}\n{}\n\n", c.report()),
        None => writeln!(f, " Skipped (no training examples)"),
    }
}
