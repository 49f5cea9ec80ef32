//! Longest-common-prefix match scoring.

use crate::config::Config;
use crate::node::NodeChain;

/// Length of the longest common prefix of the data at nodes `a` and `b`,
/// bounded by `config.max_match_for(distance_index)` and by each node's
/// remaining buffer length, and cut short at the first byte that is a
/// member of `config.no_compress()`.
pub fn match_len(chain: &NodeChain<'_>, config: &Config, a: usize, b: usize, distance_index: usize) -> usize {
    let a_data = chain.data(a);
    let b_data = chain.data(b);
    let bound = config
        .max_match_for(distance_index)
        .min(a_data.len())
        .min(b_data.len());

    let mut result = 0;
    while result < bound {
        let byte = a_data[result];
        if byte != b_data[result] || config.no_compress().contains(byte) {
            break;
        }
        result += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn matches_common_prefix() {
        let cfg = Config::default_config();
        let chain = NodeChain::new(b"ababab", &BTreeMap::new());
        // node 0 = "ababab", node 2 = "abab" -> common prefix "abab" (4 bytes)
        assert_eq!(match_len(&chain, &cfg, 0, 2, 0), 4);
    }

    #[test]
    fn stops_at_no_compress_byte() {
        let mut cfg = Config::default_config();
        let mut nc = crate::config::ByteSet::new();
        nc.insert(b'b');
        cfg.set_no_compress(nc);
        let chain = NodeChain::new(b"ababab", &BTreeMap::new());
        // first byte 'a' matches, second byte 'b' is forbidden -> stop at 1
        assert_eq!(match_len(&chain, &cfg, 0, 2, 0), 1);
    }

    #[test]
    fn bounded_by_max_match_for_distance() {
        let cfg = Config::new(2, 2).unwrap(); // zero_bits=2 extends distance 0
        let chain = NodeChain::new(b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", &BTreeMap::new());
        let at_zero = match_len(&chain, &cfg, 0, 1, 0);
        let at_one = match_len(&chain, &cfg, 0, 1, 1);
        assert_eq!(at_zero, cfg.max_match_for(0));
        assert_eq!(at_one, cfg.max_match_for(1));
        assert!(at_zero > at_one);
    }
}
