//! Reed-Solomon error correction codes.
//!
//! The error correction in a QR code is done using Reed-Solomon codes over
//! GF(256). By putting some redundancy into the symbol a reader can recover
//! from detection or printing errors.
//!
//! Only the encoding direction is needed here. The data codewords are split
//! into blocks, each block gets its own parity bytes, and the blocks are
//! interleaved so that a local defect in the printed symbol is spread over
//! several blocks.
mod galois;

use crate::version::Version;
use galois::GF;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Compute the generator polynomial of degree `len`.
///
/// The polynomial is the product of `(x - x^i)` for `i` in `0..len`. The
/// coefficients are returned with the highest power first, so the first
/// entry is always 1.
fn generator(len: usize) -> Vec<GF> {
    let mut g = vec![GF(0); len + 1];
    g[0] = GF(1);
    for i in 0..len {
        let root = GF::primitive_power(i);
        // multiply by (x + root), in place from the lowest coefficient
        for j in (1..=i + 1).rev() {
            g[j] = g[j] + g[j - 1] * root;
        }
    }
    g
}

/// Compute the final codeword sequence for the symbol.
///
/// The data codewords are split into the blocks defined for `version`, the
/// error code is computed for each block, and then data and error codewords
/// are interleaved block by block: first all data codewords, then all
/// error codewords.
pub fn encode_error(data: &[u8], version: Version) -> Vec<u8> {
    let setup = version.block_setup();
    debug_assert_eq!(data.len(), version.num_data_codewords());
    let gen = generator(setup.num_ecc_per_block);

    let blocks = split_blocks(data, setup.num_ecc_blocks);
    let ecc: Vec<Vec<u8>> = blocks.iter().map(|block| ecc_block(block, &gen)).collect();

    let mut codewords = Vec::with_capacity(data.len() + setup.num_error_codes());
    let longest = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    for i in 0..longest {
        // short blocks come first and are skipped at their last position
        codewords.extend(blocks.iter().filter_map(|b| b.get(i)));
    }
    for i in 0..setup.num_ecc_per_block {
        codewords.extend(ecc.iter().map(|e| e[i]));
    }
    codewords
}

/// Split the data into `num_blocks` blocks.
///
/// All blocks have the same size, except for the last `len % num_blocks`
/// blocks which are one codeword longer.
fn split_blocks(data: &[u8], num_blocks: usize) -> Vec<&[u8]> {
    let base = data.len() / num_blocks;
    let extra = data.len() % num_blocks;
    let mut rest = data;
    (0..num_blocks)
        .map(|i| {
            let len = base + usize::from(i >= num_blocks - extra);
            let (block, tail) = rest.split_at(len);
            rest = tail;
            block
        })
        .collect()
}

fn ecc_block(data: &[u8], g: &[GF]) -> Vec<u8> {
    // Let d be the data polynomial (n coefficients) and g the generator
    // polynomial with k + 1 coefficients.
    //
    // We compute the remainder r of the polynomial division
    //
    //     d(x) * x^k = q(x) g(x) + r(x)
    //
    // as a shift register. The quotient q is never stored, the register
    // `ecc` holds the intermediate remainder. Its last entry stays 0 and
    // is the zero shifted in at the low end.
    let ecc_len = g.len() - 1;
    let mut ecc = vec![GF(0); ecc_len + 1];
    for &a in data {
        let k = ecc[0] + GF(a);
        for j in 0..ecc_len {
            ecc[j] = ecc[j + 1] + k * g[j + 1];
        }
    }
    ecc.truncate(ecc_len);
    ecc.into_iter().map(u8::from).collect()
}

#[test]
fn generator_7() {
    // exponents of the generator coefficients as listed in ISO/IEC 18004
    let expected: Vec<GF> = [0, 87, 229, 146, 149, 238, 102, 21]
        .iter()
        .map(|&i| GF::primitive_power(i))
        .collect();
    assert_eq!(generator(7), expected);
}

#[test]
fn generator_10() {
    let expected: Vec<GF> = [0, 251, 67, 46, 61, 118, 70, 64, 94, 32, 45]
        .iter()
        .map(|&i| GF::primitive_power(i))
        .collect();
    assert_eq!(generator(10), expected);
}

#[test]
fn ecc_block_hello_world() {
    // "HELLO WORLD" as 1-M, a popular worked example
    let data = [
        32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
    ];
    let ecc = ecc_block(&data, &generator(10));
    assert_eq!(ecc, vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
}

#[test]
fn ecc_block_of_zeros() {
    let ecc = ecc_block(&[0; 19], &generator(7));
    assert_eq!(ecc, vec![0; 7]);
}

#[test]
fn split_short_blocks_first() {
    let data: Vec<u8> = (0..11).collect();
    let blocks = split_blocks(&data, 4);
    let sizes: Vec<usize> = blocks.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![2, 3, 3, 3]);
    assert_eq!(blocks[1], &[2u8, 3, 4][..]);
}

#[test]
fn interleave_single_block() {
    let v = Version::V1;
    let data: Vec<u8> = (0..19).collect();
    let cw = encode_error(&data, v);
    assert_eq!(cw.len(), 26);
    assert_eq!(&cw[..19], &data[..]);
    assert_eq!(&cw[19..], &ecc_block(&data, &generator(7))[..]);
}

#[test]
fn interleave_four_blocks() {
    let v = Version::V10;
    let data: Vec<u8> = (0..274).map(|i| (i % 251) as u8).collect();
    let cw = encode_error(&data, v);
    assert_eq!(cw.len(), 274 + 4 * 18);

    // blocks of 68, 68, 69, 69 codewords
    let starts = [0, 68, 136, 205];
    assert_eq!(&cw[..4], &[0u8, 68, 136, 205][..]);
    for i in 0..68 {
        for (b, start) in starts.iter().enumerate() {
            assert_eq!(cw[4 * i + b], data[start + i]);
        }
    }
    // only the two long blocks contribute a 69th codeword
    assert_eq!(cw[272], data[136 + 68]);
    assert_eq!(cw[273], data[205 + 68]);

    let gen = generator(18);
    let first_ecc = ecc_block(&data[..68], &gen);
    let last_ecc = ecc_block(&data[205..], &gen);
    for i in 0..18 {
        assert_eq!(cw[274 + 4 * i], first_ecc[i]);
        assert_eq!(cw[274 + 4 * i + 3], last_ecc[i]);
    }
}
