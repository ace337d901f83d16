//! Hoeffding tree induction.
//!
//! # Algorithm
//!
//! Each training instance is routed to a leaf. An active leaf updates its
//! target statistics and one observer per predictor. Every `grace_period`
//! instances a leaf that is not yet pure asks its observers for their best
//! split and compares the two best merits `m1 > m2` against the Hoeffding
//! bound `ε = sqrt(R² ln(1/δ) / 2n)`, where `n` is the weight the leaf has
//! observed itself. The leaf splits when `m1 > 0` and either `m1 - m2 > ε` or
//! `ε < tie_threshold`. Children start active, seeded with the winning
//! split's per-branch statistics. A branch that received no weight gets no
//! child; values routed there follow the default (heaviest) branch.
//!
//! When only one candidate exists, `m2` is the merit of not splitting (0).
//! Regression merits are divided by the leaf's target variance so the
//! criterion range is 1.
//!
//! Every `memory_check_period` instances the observers of active leaves are
//! measured against `max_bytes`; the least promising leaves are deactivated
//! until the estimate fits (see [`LeafPromise`](super::LeafPromise)).
//!
//! # Example
//!
//! ```
//! use streamtree::data::{Attribute, MapInstance, Model};
//! use streamtree::model::TreeConfig;
//! use streamtree::tree::HoeffdingTree;
//!
//! let model = Model::new(
//!     Attribute::nominal("play", ["yes", "no"]),
//!     vec![Attribute::numeric("temperature")],
//! )
//! .unwrap();
//! let mut tree = HoeffdingTree::new(model, TreeConfig::default()).unwrap();
//!
//! let inst = MapInstance::new().with("play", "yes").with("temperature", 21.0);
//! tree.train(&inst).unwrap();
//!
//! let prediction = tree.predict(&inst).unwrap();
//! assert_eq!(prediction.class(), Some(0));
//! assert_eq!(tree.info().node_count, 1);
//! ```

use ndarray::ArrayView2;

use crate::data::{Instance, Model, RowInstance, SchemaError, TargetValue, Value};
use crate::model::{ConfigError, LeafPrediction, TreeConfig};
use crate::stats::{ClassDistribution, TargetStats};
use crate::training::{Observer, Split, SplitCriterion, TrainingLogger};
use crate::utils::{hoeffding_bound, is_valid_weight};

use super::memory::select_for_deactivation;
use super::node::{observer_seed, Branch, Leaf, Node, NodeId, ROOT};
use super::prediction::{Prediction, TreeInfo};

/// An incrementally grown decision tree.
#[derive(Debug, Clone)]
pub struct HoeffdingTree {
    model: Model,
    config: TreeConfig,
    criterion: SplitCriterion,
    nodes: Vec<Node>,
    logger: TrainingLogger,
    /// Scratch row reused across training calls.
    row: Vec<Value>,
    instances_seen: u64,
    since_memory_check: u32,
}

impl HoeffdingTree {
    /// Create a single-leaf tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn new(model: Model, config: TreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let classification = model.is_classification();
        let criterion = SplitCriterion::for_target(classification, config.min_branch_frac);
        let logger = TrainingLogger::new(config.verbosity);
        logger.start_training(model.target().name(), model.n_predictors(), classification);

        let mut tree = Self {
            model,
            config,
            criterion,
            nodes: Vec::new(),
            logger,
            row: Vec::new(),
            instances_seen: 0,
            since_memory_check: 0,
        };
        tree.push_leaf(TargetStats::empty(classification), 1);
        Ok(tree)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The node with the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.nodes[ROOT as usize]
    }

    /// Number of leaves, active or not.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Instances with positive weight trained so far.
    #[inline]
    pub fn instances_seen(&self) -> u64 {
        self.instances_seen
    }

    /// Observer memory estimate over active leaves, in bytes.
    pub fn heap_size(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(Node::as_leaf)
            .map(Leaf::heap_size)
            .sum()
    }

    /// Structure snapshot computed by traversal from the root.
    pub fn info(&self) -> TreeInfo {
        let mut info = TreeInfo::default();
        let mut stack = vec![ROOT];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            info.node_count += 1;
            info.max_depth = info.max_depth.max(node.depth());
            match node {
                Node::Leaf(leaf) if leaf.is_active() => info.active_leaf_count += 1,
                Node::Leaf(_) => info.inactive_leaf_count += 1,
                Node::Branch(branch) => stack.extend(branch.live_children()),
            }
        }
        info
    }

    // =========================================================================
    // Training
    // =========================================================================

    /// Learn from one instance.
    ///
    /// Values are decoded before any node is touched, so a schema error
    /// leaves the tree unchanged. Instances with a non-positive or
    /// non-finite weight are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the target is missing or a value cannot be
    /// decoded.
    pub fn train<I: Instance + ?Sized>(&mut self, instance: &I) -> Result<(), SchemaError> {
        let target = self.model.decode_target(instance)?;

        let mut row = std::mem::take(&mut self.row);
        let decoded = self.model.decode_predictors(instance, &mut row);
        if decoded.is_ok() {
            self.learn(target, &row, instance.weight());
        }
        self.row = row;
        decoded
    }

    /// Learn from every row of a dense matrix laid out in model column
    /// order (target first). Stops at the first schema error.
    pub fn train_rows(&mut self, data: ArrayView2<'_, f64>) -> Result<(), SchemaError> {
        for row in data.rows() {
            self.train(&RowInstance::new(row))?;
        }
        Ok(())
    }

    fn learn(&mut self, target: TargetValue, row: &[Value], weight: f64) {
        if !is_valid_weight(weight) {
            return;
        }

        let id = self.route(row);
        let grace_period = self.config.grace_period;
        let evaluate = match self.nodes[id as usize].as_leaf_mut() {
            Some(leaf) => {
                leaf.stats.observe(target, weight);
                leaf.observed.observe(target, weight);

                if leaf.is_active() {
                    for (observer, &value) in leaf.observers.iter_mut().zip(row) {
                        observer.observe(target, value, weight);
                    }
                    leaf.since_evaluation += 1;
                    if leaf.since_evaluation >= grace_period {
                        leaf.since_evaluation = 0;
                        !leaf.observed.is_pure()
                    } else {
                        false
                    }
                } else {
                    false
                }
            }
            None => false,
        };

        if evaluate {
            self.attempt_split(id);
        }

        self.instances_seen += 1;
        self.since_memory_check += 1;
        if self.since_memory_check >= self.config.memory_check_period {
            self.since_memory_check = 0;
            self.enforce_memory_budget();
        }
    }

    /// Evaluate the leaf's candidates against the Hoeffding bound and split
    /// if the best one is clearly ahead.
    fn attempt_split(&mut self, id: NodeId) {
        let Some(leaf) = self.nodes[id as usize].as_leaf() else {
            return;
        };

        let pre = &leaf.observed;
        let weight = pre.total_weight();
        let mut candidates: Vec<Split> = leaf
            .observers
            .iter()
            .enumerate()
            .filter_map(|(predictor, o)| o.best_split(&self.criterion, predictor, pre))
            .collect();

        if candidates.is_empty() {
            self.logger.log_no_split(id, weight, 0.0, f64::INFINITY);
            return;
        }

        // Stable: equal merits keep the lowest predictor first
        candidates.sort_by(|a, b| b.merit.total_cmp(&a.merit));

        let norm = match pre {
            TargetStats::Numeric(s) if s.variance() > 0.0 => s.variance(),
            _ => 1.0,
        };
        let best = candidates[0].merit / norm;
        let second = candidates.get(1).map_or(0.0, |s| s.merit / norm).max(0.0);
        let bound = hoeffding_bound(candidates[0].range, self.config.split_confidence, weight);
        let depth = leaf.depth;

        if best > 0.0 && (best - second > bound || bound < self.config.tie_threshold) {
            let split = candidates.swap_remove(0);
            self.commit_split(id, depth, split, best, bound);
        } else {
            self.logger.log_no_split(id, weight, best - second, bound);
        }
    }

    /// Replace leaf `id` by a branch with one fresh leaf per non-empty split
    /// branch.
    fn commit_split(&mut self, id: NodeId, depth: usize, split: Split, merit: f64, bound: f64) {
        let predictor = self
            .model
            .predictors()
            .get(split.predictor())
            .map(|a| a.name().to_string())
            .unwrap_or_default();
        let default_branch = split.heaviest_branch();
        // Qualifying splits leave weight on at least two branches
        let heaviest = split.post_stats.get(default_branch);
        if heaviest.is_none_or(|stats| stats.total_weight() <= 0.0) {
            return;
        }

        let Split {
            condition,
            post_stats,
            ..
        } = split;
        let children: Vec<Option<NodeId>> = post_stats
            .into_iter()
            .map(|stats| (stats.total_weight() > 0.0).then(|| self.push_leaf(stats, depth + 1)))
            .collect();
        let Some(default_child) = children[default_branch] else {
            return;
        };

        let live = children.iter().flatten().count();
        self.logger.log_split(id, depth, &predictor, merit, bound, live);
        self.nodes[id as usize] = Node::Branch(Branch {
            condition,
            children,
            default_branch,
            default_child,
            depth,
        });
    }

    fn push_leaf(&mut self, stats: TargetStats, depth: usize) -> NodeId {
        let id = self.nodes.len() as NodeId;
        let target_kind = self.model.target().kind();
        let observers = self
            .model
            .predictors()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let seed = observer_seed(self.config.seed, id, i);
                Observer::for_attribute(target_kind, p.kind(), &self.config, seed)
            })
            .collect();

        self.nodes.push(Node::Leaf(Leaf::new(stats, observers, depth)));
        id
    }

    /// Deactivate the least promising active leaves while the observer
    /// estimate exceeds the budget.
    fn enforce_memory_budget(&mut self) {
        let promise = self.config.promise;
        let active: Vec<(NodeId, f64, usize)> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| {
                let leaf = node.as_leaf().filter(|l| l.is_active())?;
                Some((i as NodeId, promise.score(leaf), leaf.heap_size()))
            })
            .collect();
        let total: usize = active.iter().map(|&(_, _, bytes)| bytes).sum();

        let selected = select_for_deactivation(active, self.config.max_bytes);
        if selected.is_empty() {
            return;
        }

        for &id in &selected {
            if let Some(leaf) = self.nodes[id as usize].as_leaf_mut() {
                leaf.deactivate();
            }
        }
        self.logger
            .log_demotion(selected.len(), total, self.config.max_bytes);
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Predict one instance.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if a predictor value cannot be decoded. The
    /// target is not read.
    pub fn predict<I: Instance + ?Sized>(&self, instance: &I) -> Result<Prediction, SchemaError> {
        let mut row = Vec::with_capacity(self.model.n_predictors());
        self.model.decode_predictors(instance, &mut row)?;
        Ok(self.predict_row(&row))
    }

    /// Predict every row of a dense matrix in model column order.
    pub fn predict_rows(&self, data: ArrayView2<'_, f64>) -> Result<Vec<Prediction>, SchemaError> {
        data.rows()
            .into_iter()
            .map(|row| self.predict(&RowInstance::new(row)))
            .collect()
    }

    /// Predict a decoded predictor row.
    pub fn predict_row(&self, row: &[Value]) -> Prediction {
        let id = self.route(row);
        match self.nodes[id as usize].as_leaf() {
            Some(leaf) => self.leaf_prediction(leaf, row),
            None => Prediction::Value(0.0),
        }
    }

    fn leaf_prediction(&self, leaf: &Leaf, row: &[Value]) -> Prediction {
        match &leaf.stats {
            TargetStats::Numeric(s) => Prediction::Value(s.mean()),
            TargetStats::Classes(votes) => {
                let naive_bayes = self.config.leaf_prediction == LeafPrediction::NaiveBayes
                    && leaf.is_active()
                    && leaf.observed.total_weight() > 0.0;
                if naive_bayes {
                    if let Some(probs) = naive_bayes_probabilities(votes, &leaf.observers, row) {
                        return Prediction::Classes(probs);
                    }
                }
                Prediction::Classes(votes.normalized())
            }
        }
    }

    /// Leaf reached by a decoded row.
    fn route(&self, row: &[Value]) -> NodeId {
        let mut id = ROOT;
        while let Node::Branch(branch) = &self.nodes[id as usize] {
            id = branch.child(row);
        }
        id
    }
}

/// Posterior class probabilities `∝ P(class) · Π P(value_i | class)`,
/// computed in log space. Missing values are skipped, as are observers with
/// no data for the class: a class known only from the seed statistics keeps
/// its prior. `None` when no class has positive posterior.
fn naive_bayes_probabilities(
    prior: &ClassDistribution,
    observers: &[Observer],
    row: &[Value],
) -> Option<Vec<f64>> {
    let total = prior.total_weight();
    if total <= 0.0 {
        return None;
    }

    let mut scores = vec![f64::NEG_INFINITY; prior.len()];
    for (class, &votes) in prior.votes().iter().enumerate() {
        if votes <= 0.0 {
            continue;
        }

        let mut score = (votes / total).ln();
        for (observer, &value) in observers.iter().zip(row) {
            if value.is_missing() || observer.class_weight(class) <= 0.0 {
                continue;
            }
            score += observer.probability(TargetValue::Class(class), value).ln();
        }
        scores[class] = score;
    }

    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return None;
    }

    let mut probs: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
    let sum: f64 = probs.iter().sum();
    for p in &mut probs {
        *p /= sum;
    }
    Some(probs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Attribute, MapInstance};
    use crate::training::observers::GaussianClassObserver;
    use crate::tree::LeafState;

    fn xor_model() -> Model {
        Model::new(
            Attribute::nominal("class", ["neg", "pos"]),
            vec![
                Attribute::nominal("a", ["0", "1"]),
                Attribute::numeric("noise"),
            ],
        )
        .unwrap()
    }

    fn labelled(a: &str, noise: f64) -> MapInstance {
        let class = if a == "1" { "pos" } else { "neg" };
        MapInstance::new()
            .with("class", class)
            .with("a", a)
            .with("noise", noise)
    }

    fn fast_config() -> TreeConfig {
        TreeConfig::builder()
            .grace_period(20)
            .split_confidence(0.01)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_tree_is_single_active_leaf() {
        let tree = HoeffdingTree::new(xor_model(), TreeConfig::default()).unwrap();
        let info = tree.info();
        assert_eq!(info.node_count, 1);
        assert_eq!(info.active_leaf_count, 1);
        assert_eq!(info.max_depth, 1);
        assert_eq!(tree.predict(&labelled("0", 1.0)).unwrap(), Prediction::Classes(vec![]));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TreeConfig {
            grace_period: 0,
            ..TreeConfig::default()
        };
        assert!(matches!(
            HoeffdingTree::new(xor_model(), config),
            Err(ConfigError::InvalidGracePeriod)
        ));
    }

    #[test]
    fn test_splits_on_informative_attribute() {
        let mut tree = HoeffdingTree::new(xor_model(), fast_config()).unwrap();
        for i in 0..200 {
            let a = if i % 2 == 0 { "0" } else { "1" };
            tree.train(&labelled(a, (i % 5) as f64)).unwrap();
        }

        let root = tree.root().as_branch().expect("root should split");
        assert_eq!(root.condition().predictor(), 0);
        assert_eq!(root.children().len(), 2);

        let info = tree.info();
        assert_eq!(info.node_count, 3);
        assert_eq!(info.max_depth, 2);
        assert_eq!(tree.predict(&labelled("1", 0.0)).unwrap().class(), Some(1));
        assert_eq!(tree.predict(&labelled("0", 0.0)).unwrap().class(), Some(0));
    }

    fn gap_model(target: Attribute) -> Model {
        Model::new(target, vec![Attribute::nominal("k", ["a", "b", "z"])]).unwrap()
    }

    #[test]
    fn test_unseen_nominal_value_routes_to_default_child() {
        let model = gap_model(Attribute::numeric("y"));
        let mut tree = HoeffdingTree::new(model, fast_config()).unwrap();
        for i in 0..40 {
            let (k, y) = if i % 2 == 0 { ("a", 101.0) } else { ("z", 202.0) };
            tree.train(&MapInstance::new().with("k", k).with("y", y)).unwrap();
        }

        let root = tree.root().as_branch().expect("root should split");
        assert_eq!(root.children().len(), 3);
        assert!(root.children()[1].is_none());
        assert_eq!(root.default_branch(), 0);

        let info = tree.info();
        assert_eq!(info.node_count, 3);
        assert_eq!(info.active_leaf_count, 2);

        let at = |k: &str| tree.predict(&MapInstance::new().with("k", k)).unwrap();
        assert_eq!(at("b"), Prediction::Value(101.0));
        assert_eq!(at("b"), at("a"));
        assert_eq!(at("z"), Prediction::Value(202.0));
    }

    #[test]
    fn test_unseen_nominal_value_predicts_a_class() {
        let target = Attribute::nominal("level", ["lo", "hi"]);
        let mut tree = HoeffdingTree::new(gap_model(target), fast_config()).unwrap();
        for i in 0..40 {
            let (k, level) = if i % 2 == 0 { ("a", "lo") } else { ("z", "hi") };
            tree.train(&MapInstance::new().with("k", k).with("level", level)).unwrap();
        }

        assert_eq!(tree.info().node_count, 3);
        let gap = tree.predict(&MapInstance::new().with("k", "b")).unwrap();
        assert_eq!(gap.class(), Some(0));
        assert_eq!(gap, tree.predict(&MapInstance::new()).unwrap());
    }

    #[test]
    fn test_pure_leaf_never_splits() {
        let mut tree = HoeffdingTree::new(xor_model(), fast_config()).unwrap();
        for i in 0..200 {
            tree.train(&labelled("0", i as f64)).unwrap();
        }
        assert_eq!(tree.info().node_count, 1);
    }

    #[test]
    fn test_schema_error_leaves_tree_unchanged() {
        let mut tree = HoeffdingTree::new(xor_model(), fast_config()).unwrap();
        tree.train(&labelled("1", 0.0)).unwrap();

        let bad = MapInstance::new()
            .with("class", "pos")
            .with("a", "7")
            .with("noise", 1.0);
        assert!(tree.train(&bad).is_err());
        assert!(tree.train(&MapInstance::new().with("a", "1")).is_err());

        assert_eq!(tree.instances_seen(), 1);
        let leaf = tree.root().as_leaf().unwrap();
        assert_eq!(leaf.stats().total_weight(), 1.0);
    }

    #[test]
    fn test_zero_weight_is_ignored() {
        let mut tree = HoeffdingTree::new(xor_model(), fast_config()).unwrap();
        tree.train(&labelled("1", 0.0).with_weight(0.0)).unwrap();
        assert_eq!(tree.instances_seen(), 0);
        assert_eq!(tree.root().as_leaf().unwrap().stats().total_weight(), 0.0);
    }

    #[test]
    fn test_memory_budget_deactivates_leaves() {
        let config = TreeConfig::builder()
            .grace_period(20)
            .split_confidence(0.01)
            .max_bytes(0)
            .memory_check_period(10)
            .build()
            .unwrap();
        let mut tree = HoeffdingTree::new(xor_model(), config).unwrap();
        for i in 0..10 {
            tree.train(&labelled(if i % 2 == 0 { "0" } else { "1" }, 0.0)).unwrap();
        }

        let info = tree.info();
        assert_eq!(info.active_leaf_count, 0);
        assert_eq!(info.inactive_leaf_count, 1);

        // Inactive leaves keep predicting from their statistics
        tree.train(&labelled("1", 0.0)).unwrap();
        let leaf = tree.root().as_leaf().unwrap();
        assert_eq!(leaf.state(), LeafState::Inactive);
        assert_eq!(leaf.stats().total_weight(), 11.0);
        assert_eq!(tree.heap_size(), 0);
    }

    #[test]
    fn test_naive_bayes_uses_observers() {
        let config = TreeConfig::builder()
            .leaf_prediction(LeafPrediction::NaiveBayes)
            .build()
            .unwrap();
        let mut tree = HoeffdingTree::new(xor_model(), config).unwrap();
        for i in 0..20 {
            let a = if i % 2 == 0 { "0" } else { "1" };
            tree.train(&labelled(a, 0.0)).unwrap();
        }

        // Still a single leaf; majority voting would say 50/50
        assert_eq!(tree.info().node_count, 1);
        let p = tree.predict(&labelled("1", 0.0)).unwrap();
        assert!(p.probability(1) > 0.9);
    }

    #[test]
    fn test_naive_bayes_probabilities_fallback() {
        let prior = ClassDistribution::new();
        assert!(naive_bayes_probabilities(&prior, &[], &[]).is_none());

        let prior = ClassDistribution::from_votes(vec![1.0, 3.0]);
        let probs = naive_bayes_probabilities(&prior, &[], &[]).unwrap();
        assert!((probs[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_naive_bayes_keeps_prior_for_unobserved_class() {
        // Class 1 is known only from the seed statistics
        let mut observer = GaussianClassObserver::new(4);
        for v in [1.0, 2.0, 3.0] {
            observer.observe(0, Some(v), 1.0);
        }
        let observers = [Observer::GaussianClass(observer)];
        let prior = ClassDistribution::from_votes(vec![3.0, 3.0]);

        let probs = naive_bayes_probabilities(&prior, &observers, &[Value::Numeric(2.0)]).unwrap();
        let density = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
        assert!((probs[0] - density / (1.0 + density)).abs() < 1e-9);
        assert!((probs[1] - 1.0 / (1.0 + density)).abs() < 1e-9);
    }
}
