//! Integration test to verify the workspace crates link together.

#![allow(clippy::no_effect_underscore_binding)]

#[test]
fn domain_crate_compiles() {
    let _modifier = envres_domain::Modifier::Base64;
    let _step = envres_domain::Step::with_argument(envres_domain::Modifier::Env, "HOME");
    let _settings = envres_domain::ResolverSettings::default();
}

#[test]
fn application_crate_compiles() {
    let _parser = envres_application::HeapParser::new();
    let _found = envres_application::find_innermost("%env(A)%");
}

#[test]
fn infrastructure_crate_compiles() {
    let settings = envres_domain::ResolverSettings::default();
    let _processor = envres_infrastructure::default_processor(&settings);
}
