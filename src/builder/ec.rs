use std::ops::Deref;

use rayon::prelude::*;

use crate::common::{bit_utils::BitStream, galois::GF256, metadata::CodewordLayout};

// ECC: Error Correction Codeword generator
//------------------------------------------------------------------------------

pub fn ecc<'a>(data: &'a [u8], layout: &CodewordLayout) -> (Vec<&'a [u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, layout);

    let ecc_size_per_block = layout.ecc_per_block;
    let ecc_blocks = data_blocks
        .par_iter()
        .map(|b| ecc_per_block(b, ecc_size_per_block))
        .collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

// Group 1 blocks come first, then the one codeword longer group 2 blocks
pub fn blockify<'a>(data: &'a [u8], layout: &CodewordLayout) -> Vec<&'a [u8]> {
    let CodewordLayout { group1_blocks, group1_size, group2_blocks, group2_size, .. } = *layout;

    let total_group1_size = group1_size * group1_blocks;
    let total_size = total_group1_size + group2_size * group2_blocks;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(layout.block_count());
    data_blocks.extend(data[..total_group1_size].chunks(group1_size));
    if group2_size > 0 {
        data_blocks.extend(data[total_group1_size..].chunks(group2_size));
    }
    data_blocks
}

// Remainder of the message polynomial, shifted up by the ecc count, divided by
// the generator polynomial of that degree
fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let gen_poly = GF256.generator_polynomial(ecc_count);

    let mut msg = block.to_vec();
    msg.resize(block.len() + ecc_count, 0);

    GF256.poly_remainder(&msg, &gen_poly)
}

#[cfg(test)]
mod ec_tests {
    use super::{blockify, ecc, ecc_per_block};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_ecc_v1_m() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let layout = Version::new(1).unwrap().codeword_layout(ECLevel::M);
        let (data, ecc) = ecc(msg, &layout);
        assert_eq!(data, vec![&msg[..]]);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_ecc_per_block_13() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec";
        let expected_ecc = b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10";
        assert_eq!(ecc_per_block(msg, 13), expected_ecc.to_vec());
    }

    #[test]
    fn test_ecc_v5_q() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let layout = Version::new(5).unwrap().codeword_layout(ECLevel::Q);
        let (_, ecc) = ecc(msg, &layout);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_blockify_two_groups() {
        let layout = Version::new(5).unwrap().codeword_layout(ECLevel::Q);
        let data: Vec<u8> = (0..62).collect();
        let blocks = blockify(&data, &layout);
        let lens: Vec<_> = blocks.iter().map(|b| b.len()).collect();
        assert_eq!(lens, vec![15, 15, 16, 16]);
        assert_eq!(blocks[2][0], 30);
        assert_eq!(blocks[3][15], 61);
    }

    #[test]
    fn test_ecc_block_sizes() {
        for ver in Version::all() {
            for ecl in ECLevel::BY_TOLERANCE {
                let layout = ver.codeword_layout(ecl);
                let data = vec![0x5A; layout.data_codewords];
                let (data_blocks, ecc_blocks) = ecc(&data, &layout);
                assert_eq!(data_blocks.len(), layout.block_count());
                assert!(ecc_blocks.iter().all(|b| b.len() == layout.ecc_per_block));
            }
        }
    }
}

// Interleaving
//------------------------------------------------------------------------------

// Column-major read across blocks; shorter blocks drop out of later columns
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

// Interleaved data codewords followed by interleaved ecc codewords
pub fn structure(data_blocks: &[&[u8]], ecc_blocks: &[Vec<u8>], total_codewords: usize) -> BitStream {
    let mut payload = BitStream::new(total_codewords << 3);
    payload.extend(&interleave(data_blocks));
    payload.extend(&interleave(ecc_blocks));
    debug_assert!(
        payload.len() == total_codewords << 3,
        "Structured payload has {} bits, expected {}",
        payload.len(),
        total_codewords << 3
    );
    payload
}
