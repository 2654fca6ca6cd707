use serde_json::Map;
use std::{cell::RefCell, collections::BTreeMap, collections::HashMap};

use crate::{
    error::{script::ScriptExecutionError, AppError},
    model::{
        category::Category,
        channel::{Channel, ChannelKind},
        permission::{OverrideKind, PermissionOverride, PermissionValue},
        snowflake::Snowflake,
        PredicateId,
    },
    runtime::PredicateHost,
};

mod filter;
mod inheritance;
mod ordering;

fn sf(raw: u64) -> Snowflake {
    Snowflake::new(raw).unwrap()
}

fn permission_override(
    kind: OverrideKind,
    id: u64,
    permissions: &[(&str, PermissionValue)],
) -> PermissionOverride {
    PermissionOverride {
        id: sf(id),
        kind,
        permissions: permissions
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect::<BTreeMap<_, _>>(),
        extra: Map::new(),
    }
}

fn channel(id: u64, name: &str) -> Channel {
    Channel {
        id: sf(id),
        name: name.to_string(),
        kind: ChannelKind::Text,
        overrides: Vec::new(),
        options: Map::new(),
        include: None,
    }
}

fn category(id: u64, channels: Vec<Channel>, overrides: Vec<PermissionOverride>) -> Category {
    Category {
        id: sf(id),
        name: format!("category-{id}"),
        channels,
        overrides,
        include: None,
    }
}

/// Predicate host backed by plain Rust closures, recording every call.
#[derive(Default)]
struct StubHost {
    predicates: HashMap<usize, Box<dyn Fn(&Channel) -> Result<bool, AppError>>>,
    calls: RefCell<Vec<(PredicateId, Snowflake)>>,
}

impl StubHost {
    fn with(mut self, id: usize, predicate: impl Fn(&Channel) -> bool + 'static) -> Self {
        self.predicates
            .insert(id, Box::new(move |channel| Ok(predicate(channel))));
        self
    }

    fn failing(mut self, id: usize, message: &str) -> Self {
        let message = message.to_string();
        self.predicates.insert(
            id,
            Box::new(move |_| Err(ScriptExecutionError::new(message.clone()).into())),
        );
        self
    }
}

impl PredicateHost for StubHost {
    fn test(&self, predicate: PredicateId, channel: &Channel) -> Result<bool, AppError> {
        self.calls.borrow_mut().push((predicate, channel.id));
        let function = self
            .predicates
            .get(&predicate.0)
            .ok_or(crate::error::internal::InternalError::DanglingPredicate(predicate.0))?;
        function(channel)
    }
}
