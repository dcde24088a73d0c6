// pn53x-rs/pn53x/src/target/describe.rs

//! Human readable rendering of target descriptors.

use std::fmt::Write;

use crate::target::Target;
use crate::types::{BaudRate, ModulationKind};
use crate::utils::hex_columns;

/// Long family name used in target descriptions.
pub fn family_name(kind: ModulationKind) -> &'static str {
    match kind {
        ModulationKind::Iso14443a => "ISO/IEC 14443A",
        ModulationKind::Jewel => "Innovision Jewel",
        ModulationKind::Iso14443b => "ISO/IEC 14443-4B",
        ModulationKind::Iso14443bi => "ISO/IEC 14443-4B'",
        ModulationKind::Iso14443b2sr => "ISO/IEC 14443-2B ST SRx",
        ModulationKind::Iso14443b2ct => "ISO/IEC 14443-2B ASK CTx",
        ModulationKind::Felica => "FeliCa",
        ModulationKind::Dep => "D.E.P.",
        ModulationKind::Barcode => "Thinfilm NFC Barcode",
        ModulationKind::Iso14443biClass => "ISO/IEC 14443-2B-3B iClass (Picopass)",
    }
}

fn baud_label(baud: BaudRate) -> String {
    match baud.kbps() {
        Some(kbps) => format!("{} kbps", kbps),
        None => "undefined baud rate".to_string(),
    }
}

fn field(out: &mut String, label: &str, bytes: &[u8]) {
    let _ = writeln!(out, "{:>20}: {}", label, hex_columns(bytes).trim_end());
}

fn note(out: &mut String, text: &str) {
    let _ = writeln!(out, "    * {}", text);
}

/// Describe a target without help from a driver.
///
/// The first line names the family and bit rate, followed by one line per
/// field. `verbose` adds derived information (historical bytes, cascade
/// UID, DEP mode, ...).
pub fn describe(target: &Target, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) target:",
        family_name(target.kind()),
        baud_label(target.baud_rate())
    );

    match target {
        Target::Iso14443a(t) => {
            field(&mut out, "ATQA (SENS_RES)", &t.atqa);
            field(&mut out, "UID (NFCID1)", &t.uid);
            field(&mut out, "SAK (SEL_RES)", &[t.sak]);
            if !t.ats.is_empty() {
                field(&mut out, "ATS", &t.ats);
            }
            if verbose {
                if t.uid.len() == 7 || t.uid.len() == 10 {
                    field(&mut out, "Cascaded UID", &t.cascaded_uid());
                }
                if let Some(hb) = t.historical_bytes() {
                    field(&mut out, "Historical bytes", hb);
                }
                if t.is_iso14443_4() {
                    note(&mut out, "compliant with ISO/IEC 14443-4");
                } else {
                    note(&mut out, "not compliant with ISO/IEC 14443-4");
                }
            }
        }
        Target::Jewel(t) => {
            field(&mut out, "ATQA (SENS_RES)", &t.sens_res);
            field(&mut out, "4-LSB JEWELID", &t.id);
        }
        Target::Iso14443b(t) => {
            field(&mut out, "PUPI", &t.pupi);
            field(&mut out, "Application Data", &t.application_data);
            field(&mut out, "Protocol Info", &t.protocol_info);
            if verbose {
                field(&mut out, "Card IDentifier", &[t.card_identifier]);
            }
        }
        Target::Iso14443bi(t) => {
            field(&mut out, "DIV", &t.div);
            field(&mut out, "Software Version", &[t.ver_log]);
            field(&mut out, "Config", &[t.config]);
            if !t.atr.is_empty() {
                field(&mut out, "ATR", &t.atr);
            }
        }
        Target::Iso14443b2sr(t) => field(&mut out, "UID", &t.uid),
        Target::Iso14443b2ct(t) => {
            field(&mut out, "UID", &t.uid);
            field(&mut out, "Product Code", &[t.prod_code]);
            field(&mut out, "Fab Code", &[t.fab_code]);
        }
        Target::Felica(t) => {
            field(&mut out, "ID (NFCID2)", &t.id);
            field(&mut out, "Parameter (PAD)", &t.pad);
            field(&mut out, "System Code (SC)", &t.sys_code);
            if verbose {
                field(&mut out, "Response Code", &[t.res_code]);
            }
        }
        Target::Dep(t) => {
            field(&mut out, "NFCID3", &t.nfcid3);
            field(&mut out, "BS", &[t.bs]);
            field(&mut out, "BR", &[t.br]);
            field(&mut out, "TO", &[t.to]);
            field(&mut out, "PP", &[t.pp]);
            if !t.general_bytes.is_empty() {
                field(&mut out, "General Bytes", &t.general_bytes);
            }
            if verbose {
                note(&mut out, &format!("{} mode", t.dep_mode));
            }
        }
        Target::Barcode(t) => {
            let _ = writeln!(out, "{:>20}: {} bits", "Size", t.data.len() * 8);
            field(&mut out, "Content", &t.data);
        }
        Target::Iso14443biClass(t) => field(&mut out, "UID", &t.uid),
    }
    out
}
