//! Accumulating PLS playlist builder
//!
//! One builder is created per run. Each `append` adds one entry per server
//! mirror, numbering entries 1, 2, 3, ... across every channel appended since
//! the last `reset`. Per-channel output resets before each channel, while
//! single-file output keeps appending and serializes once at the end.

use tracing::debug;

use super::{ListenKey, Quality};
use crate::utils::generate_pls;

/// Streaming service domain each server host lives under
pub const DEFAULT_DOMAIN: &str = "di.fm";

/// Port the premium streams are served on
pub const STREAM_PORT: u16 = 80;

/// Length marker for live streams with no fixed duration
pub const UNKNOWN_LENGTH: i32 = -1;

/// A single `File`/`Title`/`Length` triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// 1-based position in the playlist
    pub index: usize,
    pub url: String,
    pub title: String,
    pub length: i32,
}

/// Builds PLS playlists for channels across a fixed set of server mirrors
#[derive(Debug, Clone)]
pub struct PlaylistBuilder {
    listen_key: ListenKey,
    servers: Vec<String>,
    quality: Quality,
    domain: String,
    entries: Vec<PlaylistEntry>,
}

impl PlaylistBuilder {
    /// Create an empty builder
    ///
    /// Neither the key nor the servers are validated. An empty server list
    /// is allowed and produces playlists with no entries.
    pub fn new(listen_key: ListenKey, servers: Vec<String>, quality: Quality) -> Self {
        Self {
            listen_key,
            servers,
            quality,
            domain: DEFAULT_DOMAIN.to_string(),
            entries: Vec::new(),
        }
    }

    /// Use a different service domain for stream URLs
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Discard all entries, restarting numbering at 1
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Add one entry per server for a channel
    ///
    /// Numbering continues from the entries already present; appending the
    /// same channel twice adds a second set of entries.
    pub fn append(&mut self, channel_key: &str, display_name: &str) {
        for host in &self.servers {
            let index = self.entries.len() + 1;
            let url = self.stream_url(host, channel_key);
            self.entries.push(PlaylistEntry {
                index,
                url,
                title: display_name.to_string(),
                length: UNKNOWN_LENGTH,
            });
        }

        debug!(
            "Appended {} ({} servers), playlist now has {} entries",
            channel_key,
            self.servers.len(),
            self.entries.len()
        );
    }

    /// Render the playlist as PLS text
    pub fn serialize(&self) -> String {
        generate_pls(self.entries())
    }

    /// Build the stream URL for a channel on one server host
    pub fn stream_url(&self, host: &str, channel_key: &str) -> String {
        format!(
            "http://{}.{}:{}/{}{}?{}",
            host,
            self.domain,
            STREAM_PORT,
            channel_key,
            self.quality.suffix(),
            self.listen_key.expose()
        )
    }

    /// Number of entries written since the last reset
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(servers: &[&str], quality: Quality) -> PlaylistBuilder {
        PlaylistBuilder::new(
            ListenKey::new("abc123"),
            servers.iter().map(|s| s.to_string()).collect(),
            quality,
        )
    }

    /// Parse PLS text back into (key, value) pairs, skipping the section header
    fn parse_pairs(text: &str) -> Vec<(String, String)> {
        text.lines()
            .filter(|line| !line.starts_with('['))
            .map(|line| {
                let (k, v) = line.split_once('=').expect("line without '='");
                (k.to_string(), v.to_string())
            })
            .collect()
    }

    #[test]
    fn test_single_channel_two_servers() {
        let mut pls = builder(&["prem1", "prem4"], Quality::Default);
        pls.append("trance", "Trance");

        assert_eq!(
            pls.serialize(),
            "[playlist]\n\
             File1=http://prem1.di.fm:80/trance?abc123\n\
             Title1=Trance\n\
             Length1=-1\n\
             File2=http://prem4.di.fm:80/trance?abc123\n\
             Title2=Trance\n\
             Length2=-1\n\
             NumberOfEntries=2\n\
             Version=2\n"
        );
    }

    #[test]
    fn test_line_counts_and_contiguous_indices() {
        let servers = ["prem1", "prem2", "prem3", "prem4"];
        let mut pls = builder(&servers, Quality::Default);
        pls.append("chillout", "Chillout");

        let text = pls.serialize();
        let pairs = parse_pairs(&text);
        assert_eq!(pairs.len(), 3 * servers.len() + 2);

        for (n, triple) in pairs[..3 * servers.len()].chunks(3).enumerate() {
            let i = n + 1;
            assert_eq!(triple[0].0, format!("File{}", i));
            assert_eq!(triple[1].0, format!("Title{}", i));
            assert_eq!(triple[2].0, format!("Length{}", i));
        }
        assert_eq!(pairs[pairs.len() - 2], ("NumberOfEntries".into(), "4".into()));
        assert_eq!(pairs[pairs.len() - 1], ("Version".into(), "2".into()));
    }

    #[test]
    fn test_numbering_continues_across_channels() {
        let mut pls = builder(&["prem1"], Quality::Default);
        pls.append("trance", "Trance");
        pls.append("house", "House");
        pls.append("techno", "Techno");

        let indices: Vec<usize> = pls.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(pls.entries()[2].url, "http://prem1.di.fm:80/techno?abc123");
        assert!(pls.serialize().contains("NumberOfEntries=3\n"));
    }

    #[test]
    fn test_single_file_two_channels_two_servers() {
        let mut pls = builder(&["prem1", "prem4"], Quality::Default);
        pls.append("a", "A");
        pls.append("b", "B");

        let titles: Vec<(usize, &str)> = pls
            .entries()
            .iter()
            .map(|e| (e.index, e.title.as_str()))
            .collect();
        assert_eq!(titles, vec![(1, "A"), (2, "A"), (3, "B"), (4, "B")]);
        assert!(pls.serialize().contains("NumberOfEntries=4\n"));
    }

    #[test]
    fn test_append_same_channel_twice_accumulates() {
        let mut pls = builder(&["prem1"], Quality::Default);
        pls.append("trance", "Trance");
        pls.append("trance", "Trance");

        assert_eq!(pls.entry_count(), 2);
        let text = pls.serialize();
        assert!(text.contains("File1=http://prem1.di.fm:80/trance?abc123\n"));
        assert!(text.contains("File2=http://prem1.di.fm:80/trance?abc123\n"));
    }

    #[test]
    fn test_reset_clears_entries() {
        let mut pls = builder(&["prem1", "prem4"], Quality::Default);
        pls.append("trance", "Trance");
        pls.reset();

        assert!(pls.is_empty());
        assert_eq!(pls.serialize(), "[playlist]\nNumberOfEntries=0\nVersion=2\n");

        // Idempotent when already empty
        pls.reset();
        assert_eq!(pls.entry_count(), 0);
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut pls = builder(&["prem1"], Quality::Default);
        pls.append("trance", "Trance");
        pls.reset();
        pls.append("house", "House");

        assert_eq!(pls.entries()[0].index, 1);
        assert!(pls.serialize().contains("File1=http://prem1.di.fm:80/house?abc123\n"));
    }

    #[test]
    fn test_empty_server_list() {
        let mut pls = builder(&[], Quality::Default);
        pls.append("trance", "Trance");

        assert!(pls.is_empty());
        assert!(pls.serialize().contains("NumberOfEntries=0\n"));
    }

    #[test]
    fn test_quality_suffix_in_url() {
        let pls = builder(&["prem2"], Quality::Low);
        assert_eq!(
            pls.stream_url("prem2", "vocaltrance"),
            "http://prem2.di.fm:80/vocaltrance_aac?abc123"
        );

        let pls = builder(&["prem2"], Quality::Ultra);
        assert_eq!(
            pls.stream_url("prem2", "vocaltrance"),
            "http://prem2.di.fm:80/vocaltrance_hi?abc123"
        );
    }

    #[test]
    fn test_custom_domain() {
        let mut pls = builder(&["prem1"], Quality::Default).with_domain("radiotunes.com");
        pls.append("jazz", "Jazz");
        assert_eq!(pls.entries()[0].url, "http://prem1.radiotunes.com:80/jazz?abc123");
    }

    #[test]
    fn test_keys_are_case_preserved() {
        let mut pls = builder(&["prem1"], Quality::Default);
        pls.append("trance", "Trance");
        let text = pls.serialize();

        assert!(text.contains("File1="));
        assert!(!text.contains("file1="));
        assert!(text.contains("NumberOfEntries="));
        assert!(!text.contains(" = "));
    }

    #[test]
    fn test_round_trip_recovers_appended_entries() {
        let mut pls = builder(&["prem1", "prem4"], Quality::Ultra);
        let channels = [("trance", "Trance"), ("deephouse", "Deep House")];
        for (key, name) in channels {
            pls.append(key, name);
        }

        let pairs = parse_pairs(&pls.serialize());
        let mut recovered = Vec::new();
        for triple in pairs[..pairs.len() - 2].chunks(3) {
            recovered.push((triple[0].1.clone(), triple[1].1.clone(), triple[2].1.clone()));
        }

        let expected: Vec<(String, String, String)> = channels
            .iter()
            .flat_map(|(key, name)| {
                ["prem1", "prem4"].into_iter().map(move |host| {
                    (
                        format!("http://{}.di.fm:80/{}_hi?abc123", host, key),
                        name.to_string(),
                        "-1".to_string(),
                    )
                })
            })
            .collect();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let pls = builder(&["prem1"], Quality::Default);
        assert!(!format!("{:?}", pls).contains("abc123"));
    }
}
