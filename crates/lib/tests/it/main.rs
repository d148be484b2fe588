/*! Integration tests for propbox.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - property: Tests for property builders, identity and duplication
 * - set: Tests for PropertySet construction and derived sets
 * - boxed: Tests for PropertyBox reads, writes, validation and equality
 * - convert: Tests for the built-in converters used through property boxes
 * - validation: Tests for the built-in validators
 * - adapter: Tests for path resolution and path-based box access
 * - config: Tests for typed configuration parameters
 * - path: Tests for path parsing and naming
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("propbox=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod config;
mod convert;
mod path;
mod property;
mod validation;
