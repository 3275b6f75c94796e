use std::sync::Once;

static INIT: Once = Once::new();

/// ログ初期化。`--verbose`ならdebug、RUST_LOGがあればそちらを優先
pub fn initialize(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = format!("warn,color_forms={level},color_forms_common={level}");

    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
            .format_timestamp(None)
            .init();
    });
}
