//! Human-readable text output for CRLs.
//!
//! Provides `to_text()`, which produces output similar to `openssl crl -text`.

use std::net::{Ipv4Addr, Ipv6Addr};

use crlkit_types::PkiError;
use crlkit_utils::oid::Oid;

use super::dn::format_name;
use super::{
    AuthorityKeyIdentifier, CertificateRevocationList, CrlExtension, Extension, ExtensionKind,
    GeneralName, RevokedCertificate,
};

// ---------------------------------------------------------------------------
// OID-to-name mapping
// ---------------------------------------------------------------------------

/// Map an OID to a human-readable name, falling back to dotted form.
pub fn oid_name(oid: &Oid) -> String {
    match oid_to_name(oid) {
        Some(name) => name.to_string(),
        None => oid.to_dot_string(),
    }
}

fn oid_to_name(oid: &Oid) -> Option<&'static str> {
    match oid.arcs() {
        // Signature algorithms
        [1, 2, 840, 113549, 1, 1, 4] => Some("md5WithRSAEncryption"),
        [1, 2, 840, 113549, 1, 1, 5] => Some("sha1WithRSAEncryption"),
        [1, 2, 840, 113549, 1, 1, 10] => Some("rsassaPss"),
        [1, 2, 840, 113549, 1, 1, 11] => Some("sha256WithRSAEncryption"),
        [1, 2, 840, 113549, 1, 1, 12] => Some("sha384WithRSAEncryption"),
        [1, 2, 840, 113549, 1, 1, 13] => Some("sha512WithRSAEncryption"),
        [1, 2, 840, 113549, 1, 1, 14] => Some("sha224WithRSAEncryption"),
        [1, 2, 840, 10040, 4, 3] => Some("dsa_with_SHA1"),
        [2, 16, 840, 1, 101, 3, 4, 3, 1] => Some("dsa_with_SHA224"),
        [2, 16, 840, 1, 101, 3, 4, 3, 2] => Some("dsa_with_SHA256"),
        [1, 2, 840, 10045, 4, 1] => Some("ecdsa-with-SHA1"),
        [1, 2, 840, 10045, 4, 3, 1] => Some("ecdsa-with-SHA224"),
        [1, 2, 840, 10045, 4, 3, 2] => Some("ecdsa-with-SHA256"),
        [1, 2, 840, 10045, 4, 3, 3] => Some("ecdsa-with-SHA384"),
        [1, 2, 840, 10045, 4, 3, 4] => Some("ecdsa-with-SHA512"),
        [1, 3, 101, 112] => Some("ED25519"),
        [1, 3, 101, 113] => Some("ED448"),
        [1, 2, 156, 10197, 1, 501] => Some("SM2-with-SM3"),
        // CRL and CRL entry extensions
        [2, 5, 29, 20] => Some("X509v3 CRL Number"),
        [2, 5, 29, 21] => Some("X509v3 CRL Reason Code"),
        [2, 5, 29, 24] => Some("Invalidity Date"),
        [2, 5, 29, 27] => Some("X509v3 Delta CRL Indicator"),
        [2, 5, 29, 28] => Some("X509v3 Issuing Distribution Point"),
        [2, 5, 29, 29] => Some("X509v3 Certificate Issuer"),
        [2, 5, 29, 35] => Some("X509v3 Authority Key Identifier"),
        [2, 5, 29, 46] => Some("X509v3 Freshest CRL"),
        [1, 3, 6, 1, 5, 5, 7, 1, 1] => Some("Authority Information Access"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn hex_colon(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn hex_dump(data: &[u8], indent: usize) -> String {
    let prefix = " ".repeat(indent);
    let mut lines = Vec::new();
    for chunk in data.chunks(18) {
        lines.push(format!("{prefix}{}", hex_colon(chunk)));
    }
    lines.join("\n")
}

/// INTEGER contents as decimal when they fit in a u64, hex otherwise.
fn format_integer(value: &[u8]) -> String {
    let digits = match value.iter().position(|&b| b != 0) {
        Some(start) => &value[start..],
        None => return "0".to_string(),
    };
    if digits.len() <= 8 && value.first().is_some_and(|b| b & 0x80 == 0) {
        let n = digits.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
        n.to_string()
    } else {
        hex_colon(value)
    }
}

fn format_serial(serial: &[u8]) -> String {
    serial.iter().map(|b| format!("{b:02X}")).collect()
}

fn format_time(unix_ts: i64) -> String {
    let days = unix_ts.div_euclid(86400);
    let rem = unix_ts.rem_euclid(86400);
    let hour = rem / 3600;
    let min = (rem % 3600) / 60;
    let sec = rem % 60;

    let (year, month, day) = days_to_ymd(days);
    let months = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let mon = months.get((month - 1) as usize).unwrap_or(&"???");
    format!("{mon} {day:2} {hour:02}:{min:02}:{sec:02} {year} GMT")
}

fn days_to_ymd(mut days: i64) -> (i64, i64, i64) {
    days += 719468;
    let era = if days >= 0 { days } else { days - 146096 } / 146097;
    let doe = days - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

fn format_general_name(name: &GeneralName) -> String {
    match name {
        GeneralName::Rfc822Name(s) => format!("email:{s}"),
        GeneralName::DnsName(s) => format!("DNS:{s}"),
        GeneralName::DirectoryName(s) => format!("DirName:{s}"),
        GeneralName::Uri(s) => format!("URI:{s}"),
        GeneralName::IpAddress(ip) => match ip.as_slice() {
            &[a, b, c, d] => format!("IP Address:{}", Ipv4Addr::new(a, b, c, d)),
            bytes => match <[u8; 16]>::try_from(bytes) {
                Ok(v6) => format!("IP Address:{}", Ipv6Addr::from(v6)),
                Err(_) => format!("IP Address:<invalid {}>", hex_colon(bytes)),
            },
        },
        GeneralName::RegisteredId(oid) => format!("Registered ID:{oid}"),
        GeneralName::Other { tag, .. } => format!("othername:<unsupported [{tag}]>"),
    }
}

fn format_aki(aki: &AuthorityKeyIdentifier) -> String {
    let mut out = String::new();
    if let Some(key_id) = &aki.key_identifier {
        out.push_str(&format!("                {}\n", hex_colon(key_id)));
    }
    for name in &aki.authority_cert_issuer {
        out.push_str(&format!("                {}\n", format_general_name(name)));
    }
    if let Some(serial) = &aki.authority_cert_serial {
        out.push_str(&format!("                serial:{}\n", hex_colon(serial)));
    }
    out
}

fn format_crl_extension(ext: &Extension) -> Result<String, PkiError> {
    let crit = if ext.critical() { " critical" } else { "" };
    let mut out = format!("            {}:{crit}\n", oid_name(&ext.oid));
    match CrlExtension::decode(ext)? {
        CrlExtension::AuthorityKeyIdentifier(aki) => out.push_str(&format_aki(&aki)),
        CrlExtension::CrlNumber(n) | CrlExtension::DeltaCrlIndicator(n) => {
            out.push_str(&format!("                {}\n", format_integer(&n)));
        }
        CrlExtension::Opaque { value, .. } => {
            out.push_str(&format!("{}\n", hex_dump(&value, 16)));
        }
    }
    Ok(out)
}

fn format_entry(entry: &RevokedCertificate) -> String {
    let mut out = format!(
        "    Serial Number: {}\n        Revocation Date: {}\n",
        format_serial(&entry.serial_number),
        format_time(entry.revocation_date)
    );
    if entry.extensions.is_empty() {
        return out;
    }
    out.push_str("        CRL entry extensions:\n");
    for ext in &entry.extensions {
        let crit = if ext.critical() { " critical" } else { "" };
        out.push_str(&format!("            {}:{crit}\n", oid_name(&ext.oid)));
        let line = match ext.kind() {
            ExtensionKind::CrlReason => entry.reason.map(|r| r.description().to_string()),
            ExtensionKind::InvalidityDate => entry.invalidity_date.map(format_time),
            _ => None,
        };
        match line {
            Some(line) => out.push_str(&format!("                {line}\n")),
            None => out.push_str(&format!("{}\n", hex_dump(&ext.value, 16))),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// CertificateRevocationList::to_text()
// ---------------------------------------------------------------------------

impl CertificateRevocationList {
    /// Produce human-readable text output similar to `openssl crl -text`.
    pub fn to_text(&self) -> Result<String, PkiError> {
        let tree = self.tree()?;
        let tbs = &tree.tbs;
        let mut out = String::new();
        out.push_str("Certificate Revocation List (CRL):\n");
        // An absent version field means v1.
        let version = match self.version() {
            Ok(v) => v,
            Err(_) if tbs.version.is_none() => 1,
            Err(e) => return Err(e),
        };
        out.push_str(&format!(
            "        Version {} (0x{:x})\n",
            version,
            version - 1
        ));
        out.push_str(&format!(
            "        Signature Algorithm: {}\n",
            oid_name(&tbs.signature.oid)
        ));
        out.push_str(&format!("        Issuer: {}\n", format_name(&tbs.issuer)?));
        out.push_str(&format!(
            "        Last Update: {}\n",
            format_time(tbs.this_update.timestamp)
        ));
        match &tbs.next_update {
            Some(t) => {
                out.push_str(&format!("        Next Update: {}\n", format_time(t.timestamp)))
            }
            None => out.push_str("        Next Update: NONE\n"),
        }

        let extensions = self.extensions()?;
        if !extensions.is_empty() {
            out.push_str("        CRL extensions:\n");
            for ext in extensions {
                out.push_str(&format_crl_extension(ext)?);
            }
        }

        let count = self.revoked_count()?;
        if count == 0 {
            out.push_str("No Revoked Certificates.\n");
        } else {
            out.push_str("Revoked Certificates:\n");
            for index in 0..count {
                out.push_str(&format_entry(&self.revoked_entry(index)?));
            }
        }

        out.push_str(&format!(
            "    Signature Algorithm: {}\n",
            oid_name(&tree.signature_algorithm.oid)
        ));
        out.push_str("    Signature Value:\n");
        out.push_str(&format!("{}\n", hex_dump(&tree.signature.data, 8)));
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crlkit_utils::oid::known;

    const CRL_V2_DER: &[u8] = include_bytes!("../../../../tests/vectors/crl/crl_v2.der");
    const EC_CRL_V1_DER: &[u8] = include_bytes!("../../../../tests/vectors/crl/ec_crl_v1.der");

    #[test]
    fn test_oid_name_mapping() {
        assert_eq!(
            oid_name(&known::sha256_with_rsa_encryption()),
            "sha256WithRSAEncryption"
        );
        assert_eq!(oid_name(&known::crl_number()), "X509v3 CRL Number");
        assert_eq!(oid_name(&Oid::new(&[1, 2, 3, 4])), "1.2.3.4");
    }

    #[test]
    fn test_hex_colon_and_dump() {
        assert_eq!(hex_colon(&[0xab, 0xcd, 0xef]), "ab:cd:ef");
        assert_eq!(hex_colon(&[]), "");

        let dump = hex_dump(&[0x5a; 20], 4);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    5a:5a"));
        assert_eq!(lines[1], "    5a:5a");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "Jan  1 00:00:00 1970 GMT");
        assert_eq!(format_time(1_792_117_407), "Oct 16 02:23:27 2026 GMT");
        assert_eq!(format_time(-1), "Dec 31 23:59:59 1969 GMT");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_integer(&[0x01]), "1");
        assert_eq!(format_integer(&[0x00, 0x80]), "128");
        assert_eq!(format_integer(&[0x00]), "0");
        assert_eq!(format_integer(&[0x01; 9]), "01:01:01:01:01:01:01:01:01");
    }

    #[test]
    fn test_format_general_name() {
        assert_eq!(
            format_general_name(&GeneralName::IpAddress(vec![192, 0, 2, 1])),
            "IP Address:192.0.2.1"
        );
        assert_eq!(
            format_general_name(&GeneralName::DnsName("ca.example".into())),
            "DNS:ca.example"
        );
    }

    #[test]
    fn test_to_text_v2() {
        let crl = CertificateRevocationList::from_der(CRL_V2_DER).unwrap();
        let text = crl.to_text().unwrap();
        assert!(text.starts_with("Certificate Revocation List (CRL):\n"));
        assert!(text.contains("        Version 2 (0x1)\n"));
        assert!(text.contains("Signature Algorithm: sha256WithRSAEncryption"));
        assert!(text.contains("Issuer: C=US,O=Example Org,CN=Example CRL CA"));
        assert!(text.contains("Last Update: Oct 16 02:23:27 2026 GMT"));
        assert!(text.contains("Next Update: Nov 15 02:23:27 2026 GMT"));
        assert!(text.contains("X509v3 Authority Key Identifier:"));
        assert!(text.contains("13:07:71:46:06:73:60:37:dc:5c:bf:89:ca:41:10:77:0f:c1:7e:9a"));
        assert!(text.contains("X509v3 CRL Number:\n                1\n"));
        assert!(text.contains("Serial Number: 1000"));
        assert!(text.contains("Key Compromise"));
        assert!(text.contains("Superseded"));
        assert!(text.contains("        cc:e0:5a:33"));
    }

    #[test]
    fn test_to_text_v1_without_extensions() {
        let crl = CertificateRevocationList::from_der(EC_CRL_V1_DER).unwrap();
        let text = crl.to_text().unwrap();
        assert!(text.contains("        Version 1 (0x0)\n"));
        assert!(text.contains("ecdsa-with-SHA256"));
        assert!(!text.contains("CRL extensions:"));
        assert!(text.contains("Serial Number: 2A"));
    }

    #[test]
    fn test_to_text_uninitialized() {
        let crl = CertificateRevocationList::new();
        assert!(matches!(crl.to_text(), Err(PkiError::NotInitialized)));
    }
}
