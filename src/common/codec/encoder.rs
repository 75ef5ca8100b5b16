pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::debug;

    use crate::common::bit_utils::BitStream;
    use crate::common::codec::SymbolSpec;
    use crate::common::error::{QRError, QRResult};

    use super::writer::{pad_remaining_capacity, push_prefix, push_segment, push_terminator};

    // Packs the data into exactly `data codewords * 8` bits
    pub fn encode(data: &str, spec: &SymbolSpec) -> QRResult<BitStream> {
        let bytes = data.as_bytes();
        if bytes.len() > spec.char_capacity {
            return Err(QRError::DataTooLong);
        }

        let bcap = spec.data_bit_capacity();
        let mut bs = BitStream::new(bcap);
        push_segment(bytes, spec, &mut bs)?;
        debug_assert!(
            bs.len() == 4 + spec.char_cnt_bits + spec.mode.encoded_len(bytes.len()),
            "Segment length mismatch: {} bits",
            bs.len()
        );
        debug!("Encoded {} chars into {} bits", bytes.len(), bs.len());

        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        debug_assert!(bs.len() == bcap, "Packed {} bits, expected {bcap}", bs.len());
        Ok(bs)
    }

    // Only the mode indicator, and the char count if asked, with no data or padding
    pub fn encode_prefix(data: &str, spec: &SymbolSpec, with_char_cnt: bool) -> QRResult<BitStream> {
        let len = data.len();
        if len > spec.char_capacity {
            return Err(QRError::DataTooLong);
        }

        let mut bs = BitStream::new(spec.data_bit_capacity());
        push_prefix(len, spec, with_char_cnt, &mut bs)?;
        debug!("Encoded prefix into {} bits", bs.len());
        Ok(bs)
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use log::warn;

    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, SymbolSpec, PADDING_CODEWORDS};
    use crate::common::error::{QRError, QRResult};

    pub fn push_segment(data: &[u8], spec: &SymbolSpec, out: &mut BitStream) -> QRResult<()> {
        match spec.mode {
            Mode::Numeric => {
                push_header(Mode::Numeric, data.len(), spec.char_cnt_bits, out);
                push_numeric_data(data, out);
            }
            Mode::Alphanumeric => {
                push_header(Mode::Alphanumeric, data.len(), spec.char_cnt_bits, out);
                push_alphanumeric_data(data, out);
            }
            Mode::Byte => {
                push_header(Mode::Byte, data.len(), spec.char_cnt_bits, out);
                push_byte_data(data, out);
            }
            Mode::Kanji => {
                warn!("Kanji payload encoding isn't supported, writing an empty segment");
                push_header(Mode::Kanji, 0, spec.char_cnt_bits, out);
            }
            Mode::Eci => return Err(QRError::UnsupportedMode("ECI")),
        }
        Ok(())
    }

    // Kanji payloads aren't written, so their count is always 0
    pub fn push_prefix(
        char_cnt: usize,
        spec: &SymbolSpec,
        with_char_cnt: bool,
        out: &mut BitStream,
    ) -> QRResult<()> {
        let char_cnt = match spec.mode {
            Mode::Eci => return Err(QRError::UnsupportedMode("ECI")),
            Mode::Kanji => 0,
            _ => char_cnt,
        };
        if with_char_cnt {
            push_header(spec.mode, char_cnt, spec.char_cnt_bits, out);
        } else {
            push_mode_indicator(spec.mode, out);
        }
        Ok(())
    }

    fn push_mode_indicator(mode: Mode, out: &mut BitStream) {
        out.push_bits(mode as u8, 4);
    }

    fn push_header(mode: Mode, char_cnt: usize, len_bits: usize, out: &mut BitStream) {
        push_mode_indicator(mode, out);
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(char_cnt as u16, len_bits);
    }

    // Each group keeps its width, so leading zeros in the group survive
    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.chunk_bits(chunk.len());
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.chunk_bits(chunk.len());
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(1) {
            let data = Mode::Byte.encode_chunk(chunk);
            out.push_bits(data, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}
