//! Big operators with limits (`\sum_{i=0}^n`, `\lim_{x\to 0}`).

use super::{Atom, ScriptsAtom, StackArgs, StackAtom};
use crate::boxes::MathBox;
use crate::env::Environment;
use crate::types::LimitsType;

#[derive(Debug, Clone)]
pub struct OperatorAtom {
    pub base: Box<Atom>,
    pub under: Option<Box<Atom>>,
    pub over: Option<Box<Atom>>,
    pub limits: LimitsType,
}

impl OperatorAtom {
    pub fn new(base: Atom, under: Option<Atom>, over: Option<Atom>) -> Self {
        Self {
            base: base.boxed(),
            under: under.map(Atom::boxed),
            over: over.map(Atom::boxed),
            limits: LimitsType::Normal,
        }
    }

    pub fn with_limits(mut self, limits: LimitsType) -> Self {
        self.limits = limits;
        self
    }

    pub fn create_box(&self, env: &Environment) -> MathBox {
        let under = self.under.as_deref();
        let over = self.over.as_deref();

        if let Atom::SideSets(ss) = &*self.base {
            return ss.create_box_with_limits(env, under, over);
        }

        let beside = match self.limits {
            LimitsType::NoLimits => true,
            LimitsType::Normal => !env.style().is_display(),
            LimitsType::Limits => false,
        };
        if beside {
            let base = match &*self.base {
                Atom::Typed(t) => (*t.base).clone(),
                b => b.clone(),
            };
            if under.is_none() && over.is_none() {
                return base.create_box(env);
            }
            return ScriptsAtom::new(None, under.cloned(), over.cloned()).create_beside(&base, env);
        }

        StackAtom::new(
            Some((*self.base).clone()),
            over.cloned().map(StackArgs::auto_space),
            under.cloned().map(StackArgs::auto_space),
        )
        .create_box(env)
    }
}
