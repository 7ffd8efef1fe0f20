//! Emit the C++ header that enables the observed code paths.

use crate::config::Conventions;
use crate::error::{Result, StatError};
use crate::model::Stat;
use std::fmt::{self, Write};
use std::path::Path;
use tracing::info;

/// Render the whole header in memory, then write it in one go so a failure
/// never leaves a half-written file behind.
pub fn emit(stat: &Stat, conv: &Conventions, out: &Path) -> Result<()> {
    let text = render(stat, conv);
    std::fs::write(out, &text).map_err(|source| StatError::OutputUnavailable {
        path: out.to_path_buf(),
        source,
    })?;
    info!("Wrote {} bytes to {}", text.len(), out.display());
    Ok(())
}

pub fn render(stat: &Stat, conv: &Conventions) -> String {
    let mut h = String::new();
    write_header(&mut h, stat, conv).expect("writing to a String cannot fail");
    h
}

fn write_header(h: &mut String, stat: &Stat, conv: &Conventions) -> fmt::Result {
    let p = &conv.prefixes;

    h.push_str(&conv.header);

    // ---------------------------------------------------------------
    // 1. Scopes
    // ---------------------------------------------------------------
    for scope in stat.scopes() {
        writeln!(h, "#define {}_{} 1", p.scope, scope.name)?;
    }
    if !stat.scopes().is_empty() {
        writeln!(h)?;
    }

    // ---------------------------------------------------------------
    // 2. Switches: enable flag + observed cases
    // ---------------------------------------------------------------
    for switch in stat.switches() {
        writeln!(h, "#define {}_{} 1", p.switch, switch.name)?;
        writeln!(
            h,
            "#define {}_{}{} {}",
            p.switch,
            switch.name,
            conv.cases_suffix,
            switch.cases().join(", ")
        )?;
    }
    if !stat.switches().is_empty() {
        writeln!(h)?;
    }

    // ---------------------------------------------------------------
    // 3. Factory instances that were both registered and created
    // ---------------------------------------------------------------
    for factory in stat.factories() {
        for class in factory.instances() {
            writeln!(h, "#define {}_{} 1", p.factory, class)?;
        }
    }

    h.push_str(&conv.footer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn empty_stat_is_boilerplate_only() {
        let text = render(&Stat::new(), &Conventions::default());
        assert_eq!(text, "#pragma once\n\n\n");
    }

    #[test]
    fn renders_every_section() {
        let records = vec![
            Record::Scope("foo".into()),
            Record::Case {
                switch: "bar".into(),
                value: "on".into(),
            },
            Record::Case {
                switch: "bar".into(),
                value: "off".into(),
            },
            Record::Register {
                factory: "fact1".into(),
                id: "1".into(),
                class: "Impl1".into(),
            },
            Record::Create {
                factory: "fact1".into(),
                id: "1".into(),
            },
            Record::Create {
                factory: "fact1".into(),
                id: "2".into(),
            },
        ];
        let text = render(&Stat::from_records(&records), &Conventions::default());

        assert_eq!(
            text,
            "#pragma once\n\
             \n\
             #define CC0MKLDNNPlugin_foo 1\n\
             \n\
             #define CC1MKLDNNPlugin_bar 1\n\
             #define CC1MKLDNNPlugin_bar_cases on, off\n\
             \n\
             #define CC2MKLDNNPlugin_Impl1 1\n\
             \n"
        );
    }

    #[test]
    fn custom_prefixes_are_used() {
        let mut conv = Conventions::default();
        conv.prefixes.scope = "SCOPE".into();
        conv.header = "#pragma once\n".into();
        conv.footer = String::new();

        let stat = Stat::from_records(&[Record::Scope("x".into())]);
        assert_eq!(render(&stat, &conv), "#pragma once\n#define SCOPE_x 1\n\n");
    }

    #[test]
    fn unwritable_output_is_reported() {
        let err = emit(
            &Stat::new(),
            &Conventions::default(),
            Path::new("/no/such/dir/cc.h"),
        )
        .unwrap_err();
        assert!(matches!(err, StatError::OutputUnavailable { .. }));
    }
}
