use proc_macro2::Ident;
use syn::visit::Visit;
use syn::visit_mut::{self, VisitMut};
use syn::{Expr, ExprMatch, PathSegment, Token, Type};

use crate::kinds::{ELEM, PLACEHOLDER, ZERO};

/// Finds any occurrence of an identifier.
pub struct FindIdent {
    pub find: &'static str,
    pub found: bool,
}

/// Rewrites placeholders for one concrete kind:
/// * path segments named `Kind` become the kind's variant,
/// * the type `Elem` becomes the kind's element type,
/// * the expression `ZERO` becomes the kind's zero value.
#[derive(Clone)]
pub struct Substitution {
    pub variant: Ident,
    pub ty: Type,
    pub zero: Expr,
}

/// Replicates every `match` arm whose pattern mentions `Kind` once per
/// kind, leaving the other arms untouched.
pub struct ExpandArms {
    pub substitutions: Vec<Substitution>,
}

impl FindIdent {
    pub fn new(find: &'static str) -> Self {
        FindIdent { find, found: false }
    }
}

impl<'ast> Visit<'ast> for FindIdent {
    fn visit_ident(&mut self, node: &'ast Ident) {
        if node == self.find {
            self.found = true;
        }
    }
}

impl VisitMut for Substitution {
    fn visit_path_segment_mut(&mut self, node: &mut PathSegment) {
        if node.ident == PLACEHOLDER {
            node.ident = self.variant.clone();
        }
        visit_mut::visit_path_segment_mut(self, node);
    }

    fn visit_type_mut(&mut self, node: &mut Type) {
        let is_elem = matches!(node, Type::Path(path) if path.qself.is_none() && path.path.is_ident(ELEM));
        if is_elem {
            *node = self.ty.clone();
            return;
        }
        visit_mut::visit_type_mut(self, node);
    }

    fn visit_expr_mut(&mut self, node: &mut Expr) {
        let is_zero = matches!(node, Expr::Path(path) if path.qself.is_none() && path.path.is_ident(ZERO));
        if is_zero {
            *node = self.zero.clone();
            return;
        }
        visit_mut::visit_expr_mut(self, node);
    }
}

impl VisitMut for ExpandArms {
    fn visit_expr_match_mut(&mut self, node: &mut ExprMatch) {
        // Inner matches first so that nested placeholders expand independently.
        visit_mut::visit_expr_match_mut(self, node);

        let arms = std::mem::take(&mut node.arms);
        for arm in arms {
            if !mentions(PLACEHOLDER, |finder| finder.visit_pat(&arm.pat)) {
                node.arms.push(arm);
                continue;
            }
            for substitution in self.substitutions.iter_mut() {
                let mut expanded = arm.clone();
                substitution.visit_arm_mut(&mut expanded);
                expanded.comma = Some(<Token![,]>::default());
                node.arms.push(expanded);
            }
        }
    }
}

pub fn mentions(find: &'static str, visit_with: impl FnOnce(&mut FindIdent)) -> bool {
    let mut finder = FindIdent::new(find);
    visit_with(&mut finder);
    finder.found
}

