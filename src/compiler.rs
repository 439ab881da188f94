//! Compile authoring statements into an IAM-style JSON policy document.

use tracing::debug;

use crate::error::PolicyError;
use crate::types::{
    OneOrMany, PolicyDocument, PrincipalSpec, RenderedStatement, Statement, group_conditions,
};

/// Compile an ordered sequence of statements into a policy document and
/// serialize it to compact JSON text.
///
/// Statement order is preserved verbatim; `Version` is always emitted first;
/// single-element action/resource/value lists collapse to bare strings. Any
/// statement violating its structural invariants fails the whole compilation
/// with [`PolicyError::InvalidStatement`].
///
/// Example:
/// ```rust
/// use rgw_policy_core::{Statement, compile};
/// let statement = Statement::allow()
///     .with_actions(["s3:GetObject"])
///     .with_resources(["arn:aws:s3:::b/*"]);
/// let json = compile(&[statement]).unwrap();
/// assert!(json.starts_with(r#"{"Version":"2012-10-17""#));
/// ```
pub fn compile(statements: &[Statement]) -> Result<String, PolicyError> {
    let mut rendered = Vec::with_capacity(statements.len());
    for statement in statements {
        statement.validate()?;
        rendered.push(render_statement(statement));
    }

    debug!(
        event = "Compile",
        phase = "Render",
        statements = statements.len()
    );

    PolicyDocument::new(rendered).to_json()
}

fn render_statement(statement: &Statement) -> RenderedStatement {
    RenderedStatement {
        sid: statement.sid().map(str::to_string),
        effect: statement.effect(),
        principal: PrincipalSpec::from_blocks(statement.principals()),
        not_principal: PrincipalSpec::from_blocks(statement.not_principals()),
        action: non_empty(statement.actions()),
        not_action: non_empty(statement.not_actions()),
        resource: non_empty(statement.resources()),
        not_resource: non_empty(statement.not_resources()),
        condition: if statement.conditions().is_empty() {
            None
        } else {
            Some(group_conditions(statement.conditions()))
        },
    }
}

fn non_empty(values: &[String]) -> Option<OneOrMany<String>> {
    if values.is_empty() {
        None
    } else {
        Some(OneOrMany::from(values.to_vec()))
    }
}
