//! Target registry
//!
//! Turns a parsed [`TargetsFileConfig`] into validated, immutable [`Target`]s and
//! resolves target names into the flat, ordered list of steps an invocation runs.

use std::collections::HashMap;
use std::fmt;

use globset::Glob;
use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::configs::targets::{RemoveConfig, StepConfig, TargetConfig, TargetsFileConfig};
use crate::types::{TendError, TendResult};

/// Name reserved for the help listing
pub const HELP_TARGET: &str = "help";

/// A single unit of work inside a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Launch `program` with `args`, looked up on `PATH`
    Exec { program: String, args: Vec<String> },
    /// Run a command line through the platform shell
    Shell(String),
    /// Delete workspace paths matching any of the glob patterns
    Remove { patterns: Vec<String> },
}

impl Step {
    fn from_config(target: &str, config: &StepConfig) -> TendResult<Self> {
        match config {
            StepConfig::Argv(parts) => match parts.split_first() {
                Some((program, args)) if !program.trim().is_empty() => Ok(Step::Exec {
                    program: program.clone(),
                    args: args.to_vec(),
                }),
                _ => Err(TendError::Config(format!(
                    "Target '{}' has a step with no program",
                    target
                ))),
            },
            StepConfig::Shell(line) => {
                if line.trim().is_empty() {
                    return Err(TendError::Config(format!(
                        "Target '{}' has an empty shell step",
                        target
                    )));
                }
                Ok(Step::Shell(line.clone()))
            }
            StepConfig::Remove(RemoveConfig { remove }) => {
                if remove.is_empty() {
                    return Err(TendError::Config(format!(
                        "Target '{}' has a remove step with no patterns",
                        target
                    )));
                }
                for pattern in remove {
                    Glob::new(pattern).map_err(|e| {
                        TendError::Config(format!(
                            "Target '{}' has an invalid remove pattern '{}': {}",
                            target, pattern, e
                        ))
                    })?;
                }
                Ok(Step::Remove {
                    patterns: remove.clone(),
                })
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Exec { program, args } => {
                write!(f, "{}", quote(program))?;
                for arg in args {
                    write!(f, " {}", quote(arg))?;
                }
                Ok(())
            }
            Step::Shell(line) => write!(f, "{}", line),
            Step::Remove { patterns } => write!(f, "remove {}", patterns.join(" ")),
        }
    }
}

fn quote(word: &str) -> String {
    if word.is_empty() || word.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", word.replace('\'', r"'\''"))
    } else {
        word.to_string()
    }
}

/// What a target does when invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    Steps(Vec<Step>),
    Composite(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub description: Option<String>,
    pub kind: TargetKind,
}

impl Target {
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, TargetKind::Composite(_))
    }
}

/// A step together with the (non-composite) target that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub target: String,
    pub step: Step,
}

/// One line of the help listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: String,
    pub description: String,
    pub composite: bool,
}

/// Immutable, validated set of targets in declaration order
#[derive(Debug, Clone)]
pub struct Registry {
    targets: Vec<Target>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn from_config(config: &TargetsFileConfig) -> TendResult<Self> {
        let mut targets = Vec::with_capacity(config.targets.len());
        let mut index = HashMap::new();

        for target_config in &config.targets {
            let target = Self::build_target(target_config)?;
            if index.insert(target.name.clone(), targets.len()).is_some() {
                return Err(TendError::Config(format!(
                    "Target '{}' is defined more than once",
                    target.name
                )));
            }
            targets.push(target);
        }

        let registry = Self { targets, index };
        registry.check_composite_references()?;
        Ok(registry)
    }

    fn build_target(config: &TargetConfig) -> TendResult<Target> {
        let name = config.name.trim();
        if name.is_empty() {
            return Err(TendError::Config("Target names must not be empty".to_string()));
        }
        if name != config.name {
            return Err(TendError::Config(format!(
                "Target name '{}' has surrounding whitespace",
                config.name
            )));
        }
        if name == HELP_TARGET {
            return Err(TendError::Config(format!(
                "Target name '{}' is reserved",
                HELP_TARGET
            )));
        }

        let kind = match (&config.steps, &config.targets) {
            (Some(steps), None) => TargetKind::Steps(
                steps
                    .iter()
                    .map(|step| Step::from_config(name, step))
                    .collect::<TendResult<Vec<_>>>()?,
            ),
            (None, Some(members)) => TargetKind::Composite(members.clone()),
            (Some(_), Some(_)) => {
                return Err(TendError::Config(format!(
                    "Target '{}' declares both steps and targets",
                    name
                )))
            }
            (None, None) => {
                return Err(TendError::Config(format!(
                    "Target '{}' declares neither steps nor targets",
                    name
                )))
            }
        };

        Ok(Target {
            name: name.to_string(),
            description: config.description.clone(),
            kind,
        })
    }

    /// Reject references to missing targets and reference cycles between composites
    fn check_composite_references(&self) -> TendResult<()> {
        let mut graph = DiGraph::<&str, ()>::new();
        let nodes: Vec<NodeIndex> = self
            .targets
            .iter()
            .map(|t| graph.add_node(t.name.as_str()))
            .collect();

        for (position, target) in self.targets.iter().enumerate() {
            let TargetKind::Composite(members) = &target.kind else {
                continue;
            };
            for member in members {
                let Some(&member_position) = self.index.get(member) else {
                    return Err(TendError::Config(format!(
                        "Target '{}' references '{}' which is not defined",
                        target.name, member
                    )));
                };
                graph.add_edge(nodes[position], nodes[member_position], ());
            }
        }

        let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].to_string())
                    .collect::<Vec<_>>();
                cycle.sort();
                cycle
            })
            .collect();

        if cycles.is_empty() {
            return Ok(());
        }

        cycles.sort();
        let message = cycles
            .into_iter()
            .map(|mut cycle| {
                if let Some(first) = cycle.first().cloned() {
                    cycle.push(first);
                }
                cycle.join(" -> ")
            })
            .collect::<Vec<_>>()
            .join("; ");
        Err(TendError::Config(format!(
            "Circular target reference detected: {}",
            message
        )))
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.index.get(name).map(|&i| &self.targets[i])
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Registered targets with descriptions, in declaration order
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.targets
            .iter()
            .map(|t| HelpEntry {
                name: t.name.clone(),
                description: t.description.clone().unwrap_or_default(),
                composite: t.is_composite(),
            })
            .collect()
    }

    /// Flatten a target into the ordered steps an invocation would run
    pub fn resolve(&self, name: &str) -> TendResult<Vec<PlannedStep>> {
        let target = self.get(name).ok_or_else(|| TendError::UnknownTarget {
            name: name.to_string(),
            suggestion: self.suggest(name),
        })?;

        let mut planned = Vec::new();
        self.collect_steps(target, &mut planned);
        Ok(planned)
    }

    // Composite cycles are rejected in `from_config`, so recursion terminates.
    fn collect_steps(&self, target: &Target, planned: &mut Vec<PlannedStep>) {
        match &target.kind {
            TargetKind::Steps(steps) => {
                planned.extend(steps.iter().map(|step| PlannedStep {
                    target: target.name.clone(),
                    step: step.clone(),
                }));
            }
            TargetKind::Composite(members) => {
                for member in members.iter().filter_map(|m| self.get(m)) {
                    self.collect_steps(member, planned);
                }
            }
        }
    }

    /// Closest registered name within edit distance 2
    pub fn suggest(&self, name: &str) -> Option<String> {
        self.targets
            .iter()
            .map(|t| (edit_distance(name, &t.name), &t.name))
            .filter(|(distance, _)| *distance <= 2)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate.clone())
    }
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != *b_char);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        previous = current;
    }

    previous[b_chars.len()]
}
