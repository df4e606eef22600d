/// Contiguous, order-preserving batches of at most `size` addresses.
///
/// `size` must be at least 1; configuration validation guarantees this.
pub fn batches(addresses: &[String], size: usize) -> impl Iterator<Item = &[String]> {
    addresses.chunks(size.max(1))
}

pub fn batch_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}
