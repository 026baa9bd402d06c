//! Parsing and rendering of the ifupdown interfaces syntax.
//!
//! The grammar handled here is the subset needed to read and faithfully
//! rewrite adapter stanzas:
//!
//! ```text
//! source /etc/network/interfaces.d/*
//!
//! auto enp1s0
//! allow-hotplug enp1s0
//! no-auto-down enp1s0
//! iface enp1s0 inet static
//!     address 192.168.1.100
//!     netmask 255.255.255.0
//!     gateway 192.168.1.1
//!     mtu 9000
//! ```
//!
//! An interface may have several stanzas of the same family (extra
//! addresses); each becomes its own [`Adapter`], in file order.
//!
//! Comments and blank lines are not preserved. Lines ending in `\` are
//! joined with the following line.

use std::fmt::Write as _;
use std::net::IpAddr;

use thiserror::Error;

use crate::network::{Adapter, AddressFamily, ConfigMethod, mask_from_prefix, prefix_len};

/// An include directive of the interfaces file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `source <glob>`: every file matching the pattern.
    Glob(String),
    /// `source-directory <dir>`: every suitably named file in the directory.
    Directory(String),
}

impl Source {
    /// Returns the pattern or directory exactly as written.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Glob(pattern) | Self::Directory(pattern) => pattern,
        }
    }

    const fn keyword(&self) -> &'static str {
        match self {
            Self::Glob(_) => "source",
            Self::Directory(_) => "source-directory",
        }
    }
}

/// The contents of one interfaces file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Include directives in file order.
    pub sources: Vec<Source>,
    /// Adapters in file order.
    pub adapters: Vec<Adapter>,
}

/// A syntax error, with the 1-based line where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct SyntaxError {
    /// Line number of the offending (first physical) line.
    pub line: usize,
    /// What is wrong with it.
    pub reason: String,
}

impl SyntaxError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses an interfaces file.
///
/// # Errors
///
/// Returns [`SyntaxError`] when:
/// - An option line appears before any `iface` stanza
/// - An `iface` line is incomplete or names an unsupported family
/// - `address`, `netmask` or `gateway` values are not addresses
/// - A directive this parser does not understand opens a new block
pub fn parse(content: &str) -> Result<Document, SyntaxError> {
    let mut parser = Parser::default();
    for (line, text) in logical_lines(content) {
        parser.line(line, &text)?;
    }
    Ok(parser.document)
}

#[derive(Default)]
struct Parser {
    document: Document,
    /// Index of the adapter whose stanza is open for option lines.
    open: Option<usize>,
}

impl Parser {
    fn line(&mut self, line: usize, text: &str) -> Result<(), SyntaxError> {
        let mut words = text.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(());
        };

        match keyword {
            "iface" => {
                let args: Vec<&str> = words.collect();
                self.open_stanza(line, &args)
            }
            "auto" => {
                self.open = None;
                for name in words {
                    let index = self.entry(name);
                    self.document.adapters[index].auto = true;
                }
                Ok(())
            }
            "source" | "source-directory" => {
                self.open = None;
                let pattern = text[keyword.len()..].trim();
                if pattern.is_empty() {
                    return Err(SyntaxError::new(line, format!("{keyword} without a path")));
                }
                let source = if keyword == "source" {
                    Source::Glob(pattern.to_string())
                } else {
                    Source::Directory(pattern.to_string())
                };
                self.document.sources.push(source);
                Ok(())
            }
            "no-auto-down" | "no-scripts" => {
                self.open = None;
                for name in words {
                    let index = self.entry(name);
                    let flags = &mut self.document.adapters[index].flags;
                    if !flags.iter().any(|flag| flag == keyword) {
                        flags.push(keyword.to_string());
                    }
                }
                Ok(())
            }
            "mapping" | "rename" | "template" => Err(
                SyntaxError::new(line, format!("unsupported directive '{keyword}'")),
            ),
            _ => {
                if let Some(class) = keyword.strip_prefix("allow-") {
                    self.open = None;
                    for name in words {
                        let index = self.entry(name);
                        self.document.adapters[index].allow.push(class.to_string());
                    }
                    return Ok(());
                }
                let value = text[keyword.len()..].trim();
                self.option(line, keyword, value)
            }
        }
    }

    fn open_stanza(&mut self, line: usize, args: &[&str]) -> Result<(), SyntaxError> {
        let [name, family, method] = args else {
            return Err(SyntaxError::new(
                line,
                "expected 'iface <name> <family> <method>'",
            ));
        };
        let family = AddressFamily::from_keyword(family).ok_or_else(|| {
            SyntaxError::new(line, format!("unsupported address family '{family}'"))
        })?;

        let adapters = &mut self.document.adapters;
        let method = ConfigMethod::from_keyword(method);
        // Claim a placeholder created by an earlier auto/allow line.
        let index = if let Some(index) = adapters
            .iter()
            .position(|adapter| adapter.name == *name && adapter.stanza.is_none())
        {
            let placeholder = &mut adapters[index];
            *placeholder = Adapter {
                auto: placeholder.auto,
                allow: std::mem::take(&mut placeholder.allow),
                flags: std::mem::take(&mut placeholder.flags),
                ..Adapter::new(*name, family, method)
            };
            index
        } else {
            adapters.push(Adapter::new(*name, family, method));
            adapters.len() - 1
        };

        self.open = Some(index);
        Ok(())
    }

    fn option(&mut self, line: usize, keyword: &str, value: &str) -> Result<(), SyntaxError> {
        let Some(index) = self.open else {
            return Err(SyntaxError::new(
                line,
                format!("'{keyword}' outside of an iface stanza"),
            ));
        };
        let adapter = &mut self.document.adapters[index];
        let family = adapter.family().unwrap_or(AddressFamily::Inet);

        match keyword {
            "address" => {
                let (address, prefix) = parse_cidr(value)
                    .ok_or_else(|| SyntaxError::new(line, format!("invalid address '{value}'")))?;
                adapter.address = Some(address);
                if let Some(prefix) = prefix {
                    adapter.netmask = mask_from_prefix(AddressFamily::of(address), prefix);
                }
            }
            "netmask" => {
                let netmask = parse_netmask(family, value)
                    .ok_or_else(|| SyntaxError::new(line, format!("invalid netmask '{value}'")))?;
                adapter.netmask = Some(netmask);
            }
            "gateway" => {
                let gateway = value
                    .parse()
                    .map_err(|_| SyntaxError::new(line, format!("invalid gateway '{value}'")))?;
                adapter.gateway = Some(gateway);
            }
            _ => adapter
                .options
                .push((keyword.to_string(), value.to_string())),
        }
        Ok(())
    }

    /// Returns the index of the first adapter named `name`, creating a
    /// stanza-less placeholder if there is none yet.
    fn entry(&mut self, name: &str) -> usize {
        let adapters = &mut self.document.adapters;
        adapters
            .iter()
            .position(|adapter| adapter.name == name)
            .unwrap_or_else(|| {
                adapters.push(Adapter::bare(name));
                adapters.len() - 1
            })
    }
}

/// Splits content into logical lines, joining `\` continuations and
/// dropping comments and blank lines.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in content.lines().enumerate() {
        let number = index + 1;
        let trimmed = raw.trim();

        if pending.is_none() && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }

        let (start, mut text) = pending.take().unwrap_or((number, String::new()));
        if let Some(head) = trimmed.strip_suffix('\\') {
            text.push_str(head.trim_end());
            text.push(' ');
            pending = Some((start, text));
        } else {
            text.push_str(trimmed);
            lines.push((start, text));
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

fn parse_cidr(value: &str) -> Option<(IpAddr, Option<u8>)> {
    match value.split_once('/') {
        Some((address, prefix)) => {
            let address: IpAddr = address.parse().ok()?;
            let prefix: u8 = prefix.parse().ok()?;
            mask_from_prefix(AddressFamily::of(address), prefix)?;
            Some((address, Some(prefix)))
        }
        None => Some((value.parse().ok()?, None)),
    }
}

fn parse_netmask(family: AddressFamily, value: &str) -> Option<IpAddr> {
    if let Ok(mask) = value.parse::<IpAddr>() {
        return Some(mask);
    }
    mask_from_prefix(family, value.parse().ok()?)
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders a document in canonical layout.
///
/// Include directives come first, followed by one block per adapter.
/// Typed options are written before the uninterpreted ones; IPv6 netmasks
/// are written as prefix lengths.
#[must_use]
pub fn render(document: &Document) -> String {
    let mut out = String::new();

    for source in &document.sources {
        let _ = writeln!(out, "{} {}", source.keyword(), source.pattern());
    }

    for adapter in &document.adapters {
        if !out.is_empty() {
            out.push('\n');
        }
        render_adapter(&mut out, adapter);
    }

    out
}

fn render_adapter(out: &mut String, adapter: &Adapter) {
    let name = &adapter.name;
    if adapter.auto {
        let _ = writeln!(out, "auto {name}");
    }
    for class in &adapter.allow {
        let _ = writeln!(out, "allow-{class} {name}");
    }
    for flag in &adapter.flags {
        let _ = writeln!(out, "{flag} {name}");
    }

    let Some(stanza) = &adapter.stanza else {
        return;
    };
    let _ = writeln!(out, "iface {name} {} {}", stanza.family, stanza.method);

    if let Some(address) = adapter.address {
        let _ = writeln!(out, "    address {address}");
    }
    if let Some(netmask) = adapter.netmask {
        match (stanza.family, prefix_len(netmask)) {
            (AddressFamily::Inet6, Some(prefix)) => {
                let _ = writeln!(out, "    netmask {prefix}");
            }
            _ => {
                let _ = writeln!(out, "    netmask {netmask}");
            }
        }
    }
    if let Some(gateway) = adapter.gateway {
        let _ = writeln!(out, "    gateway {gateway}");
    }
    for (keyword, value) in &adapter.options {
        if value.is_empty() {
            let _ = writeln!(out, "    {keyword}");
        } else {
            let _ = writeln!(out, "    {keyword} {value}");
        }
    }
}
