//! # agentdocs RBAC
//!
//! Evaluates the access declarations of agent definitions. Nothing here
//! grants or denies live operations; it only answers what a definition declares.
//!
//! ## Components
//!
//! - `Resolver` - Inheritance chains and effective scope
//! - `ScopeRules` - Path matching against access and modify entries
//! - `DelegationGraph` - Declared delegation between agents

pub mod delegation;
pub mod resolver;
pub mod scope;

pub use delegation::{can_delegate, DelegationGraph};
pub use resolver::{EffectiveEntry, ResolvedAgent, Resolver};
pub use scope::{ScopeEntry, ScopeRules};
