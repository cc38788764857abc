//! Subcommand implementations

pub mod find;
pub mod list;
pub mod render;

use errforge_core::factory::ROOT_TYPE_NAME;
use errforge_core::instance::status_for_code;
use errforge_core::ErrorType;

/// Status instances of `ty` report unless given one
pub(crate) fn effective_status(ty: &ErrorType) -> u16 {
    ty.status_code().unwrap_or_else(|| status_for_code(ty.code()))
}

/// `Child -> Parent -> ... -> Error`
pub(crate) fn lineage(ty: &ErrorType) -> String {
    ty.ancestors()
        .map(ErrorType::name)
        .chain(std::iter::once(ROOT_TYPE_NAME))
        .collect::<Vec<_>>()
        .join(" -> ")
}
