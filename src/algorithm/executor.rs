use crate::{
    algorithm::queue::RegionQueue,
    io::configuration::MAX_ITERATIONS,
    io::error::{Result, WithContext, invalid_parameter},
    spatial::{QuadTree, Region, RegionId},
};

/// Channels tracked per sample, fixed for a whole run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Red, green and blue; rendered opaque
    #[default]
    Rgb,
    /// Red, green, blue and alpha; alpha is averaged but never scored
    Rgba,
}

impl ChannelLayout {
    /// Number of channels per sample
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// What the driver does when the worst region is too small to split
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnsplittablePolicy {
    /// Requeue the region and halt the whole run
    #[default]
    HaltAll,
    /// Retire the region as a permanent leaf and try the next candidate
    SkipRegion,
}

/// Lifecycle of a refinement run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefinementState {
    /// Candidates and iterations remain
    Running,
    /// Stopped early on an unsplittable region or an empty queue
    Halted,
    /// Iteration budget exhausted
    Done,
}

impl RefinementState {
    /// Whether no further steps will modify the tree
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// A leaf replaced by its four children during one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitRecord {
    /// One-based count of splits performed so far, this one included
    pub iteration: usize,
    /// Region demoted to an internal node
    pub parent: RegionId,
    /// New leaves in top-left, top-right, bottom-left, bottom-right order
    pub children: [RegionId; 4],
}

/// Result of a single refinement step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A region was split
    Split(SplitRecord),
    /// The run is halted; the tree was not modified
    Halted,
    /// The iteration budget is spent; the tree was not modified
    Done,
}

/// Session parameters controlling a refinement run
#[derive(Clone, Copy, Debug)]
pub struct RefinementConfig {
    /// Maximum number of splits to perform
    pub iterations: usize,
    /// Channels tracked per sample
    pub layout: ChannelLayout,
    /// Handling of regions that cannot be split
    pub policy: UnsplittablePolicy,
}

impl RefinementConfig {
    /// Check the iteration budget is within range
    ///
    /// # Errors
    ///
    /// Returns an error if `iterations` is zero or above `MAX_ITERATIONS`
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(invalid_parameter(
                "iterations",
                &self.iterations,
                &format!("must be between 1 and {MAX_ITERATIONS}"),
            ));
        }
        Ok(())
    }
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            iterations: crate::io::configuration::DEFAULT_ITERATIONS,
            layout: ChannelLayout::default(),
            policy: UnsplittablePolicy::default(),
        }
    }
}

/// Greedy driver that repeatedly splits the worst-approximated leaf
///
/// Owns the quadtree and the queue of live leaves. Each step pops the
/// highest-error leaf, splits it, and queues the four children.
pub struct GreedyRefiner {
    tree: QuadTree,
    queue: RegionQueue,
    state: RefinementState,
    policy: UnsplittablePolicy,
    remaining: usize,
    iteration: usize,
    halted_on: Option<RegionId>,
}

impl GreedyRefiner {
    /// Start a run from the region covering the whole image
    ///
    /// A zero budget yields a driver that is already `Done`.
    pub fn new(root: Region, iterations: usize, policy: UnsplittablePolicy) -> Self {
        let tree = QuadTree::from_root(root);
        let root_score = tree.root_region().map_or(0.0, Region::error_score);
        let queue = RegionQueue::seeded(tree.root(), root_score);
        let state = if iterations == 0 {
            RefinementState::Done
        } else {
            RefinementState::Running
        };

        Self {
            tree,
            queue,
            state,
            policy,
            remaining: iterations,
            iteration: 0,
            halted_on: None,
        }
    }

    /// Start a run after validating the session parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range
    pub fn from_config(root: Region, config: &RefinementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(root, config.iterations, config.policy))
    }

    /// Perform one pop-split-push cycle
    ///
    /// Stepping a halted or finished driver returns its terminal outcome
    /// without touching the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree and queue disagree about a region
    pub fn step(&mut self) -> Result<StepOutcome> {
        match self.state {
            RefinementState::Halted => return Ok(StepOutcome::Halted),
            RefinementState::Done => return Ok(StepOutcome::Done),
            RefinementState::Running => {}
        }

        let iteration = self.iteration + 1;

        let parent = loop {
            let Some(id) = self.queue.pop() else {
                log::debug!("Queue exhausted before iteration {iteration}");
                self.state = RefinementState::Halted;
                return Ok(StepOutcome::Halted);
            };

            let region = self.tree.region(id).with_iteration(iteration)?;
            if region.is_splittable() {
                break id;
            }

            match self.policy {
                UnsplittablePolicy::HaltAll => {
                    log::debug!(
                        "Halting at iteration {iteration}: region at {:?} is {}x{}",
                        region.origin(),
                        region.width(),
                        region.height()
                    );
                    self.queue.push(id, region.error_score());
                    self.halted_on = Some(id);
                    self.state = RefinementState::Halted;
                    return Ok(StepOutcome::Halted);
                }
                UnsplittablePolicy::SkipRegion => {
                    log::trace!("Retiring unsplittable region at {:?}", region.origin());
                }
            }
        };

        let children = self.tree.split(parent).with_iteration(iteration)?;
        for child in children {
            let score = self.tree.region(child).with_iteration(iteration)?.error_score();
            self.queue.push(child, score);
        }

        self.iteration = iteration;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = RefinementState::Done;
        }

        log::debug!(
            "Iteration {iteration}: split region {} into {:?}",
            parent.index(),
            children.map(RegionId::index)
        );

        Ok(StepOutcome::Split(SplitRecord {
            iteration,
            parent,
            children,
        }))
    }

    /// Step until the run halts or finishes, reporting every split
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step or by `on_split`
    pub fn run<F>(&mut self, mut on_split: F) -> Result<RefinementState>
    where
        F: FnMut(&QuadTree, &SplitRecord) -> Result<()>,
    {
        while let StepOutcome::Split(record) = self.step()? {
            on_split(&self.tree, &record)?;
        }
        Ok(self.state)
    }

    /// Tree built so far
    pub const fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Leaves still eligible for splitting
    pub const fn queue(&self) -> &RegionQueue {
        &self.queue
    }

    /// Current lifecycle state
    pub const fn state(&self) -> RefinementState {
        self.state
    }

    /// Splits performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Iterations left in the budget
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Unsplittable region that stopped a `HaltAll` run
    ///
    /// `None` while running, after a normal finish, and when the queue ran dry.
    pub const fn halted_on(&self) -> Option<RegionId> {
        self.halted_on
    }

    /// Active unsplittable-region policy
    pub const fn policy(&self) -> UnsplittablePolicy {
        self.policy
    }
}
