//! Stub templates compiled into the binary.
//!
//! Sources live under `crates/fetchday-adapters/templates/<lang>/` using the
//! same `X.stpl.EXT` naming a user templates directory uses, so a copy of
//! that tree is a valid starting point for an override.

use fetchday_core::domain::{DomainError, Lang, StubTemplate, TemplateOrigin};

macro_rules! template {
    ($path:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path))
    };
}

/// Built-in template set for one language.
pub fn builtin(lang: Lang) -> Result<StubTemplate, DomainError> {
    let template = StubTemplate::new(lang, TemplateOrigin::Builtin);

    let template = match lang {
        Lang::Go => template
            .with_file("main.go", template!("go/main.stpl.go"))?
            .with_file("main_test.go", template!("go/main_test.stpl.go"))?,
        Lang::Rs => template
            .with_file("Cargo.toml", template!("rs/Cargo.stpl.toml"))?
            .with_file("src/lib.rs", template!("rs/src/lib.stpl.rs"))?
            .with_file(
                "src/bin/{{CRATE_NAME}}.rs",
                template!("rs/src/bin/{{CRATE_NAME}}.stpl.rs"),
            )?
            .with_file("benches/bench.rs", template!("rs/benches/bench.stpl.rs"))?,
        Lang::Ts => template
            .with_file("main.ts", template!("ts/main.stpl.ts"))?
            .with_file("day.ts", template!("ts/day.stpl.ts"))?
            .with_file("day.test.ts", template!("ts/day.test.stpl.ts"))?
            .with_file("day.bench.ts", template!("ts/day.bench.stpl.ts"))?,
    };

    template.validate()?;
    Ok(template)
}

/// Built-in template sets for every language.
pub fn all_templates() -> Result<Vec<StubTemplate>, DomainError> {
    Lang::ALL.into_iter().map(builtin).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_template() {
        let templates = all_templates().unwrap();
        assert_eq!(templates.len(), Lang::ALL.len());
        assert!(templates.iter().all(|t| t.origin == TemplateOrigin::Builtin));
    }

    #[test]
    fn rust_binary_is_named_after_the_crate() {
        let rs = builtin(Lang::Rs).unwrap();
        let paths: Vec<String> = rs.files.iter().map(|f| f.path.to_string()).collect();
        assert!(paths.contains(&"src/bin/{{CRATE_NAME}}.rs".to_string()));
    }

    #[test]
    fn go_stub_reads_the_package_data_file() {
        let go = builtin(Lang::Go).unwrap();
        let main = go.files.iter().find(|f| f.path.to_string() == "main.go").unwrap();
        assert!(main.content.as_str().contains("\"{{PACKAGE_NAME}}.txt\""));
    }
}
