pub mod skill_tree;

pub use skill_tree::{NodeId, SkillNode, SkillTree, PLACEHOLDER_COLOR};
