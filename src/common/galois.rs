// Galois field GF(256) over the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub const PRIMITIVE_POLY: u16 = 0x11D;

#[derive(Debug)]
pub struct GaloisField {
    log: [u8; 256],
    exp: [u8; 256],
}

// Tables are built at compile time, so the field is immutable and shared by reference
pub static GF256: GaloisField = GaloisField::new();

impl GaloisField {
    const fn new() -> Self {
        let mut log = [0u8; 256];
        let mut exp = [0u8; 256];
        let mut x: u16 = 1;
        let mut i = 0;
        while i < 255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLY;
            }
            i += 1;
        }
        exp[255] = exp[0];
        Self { log, exp }
    }

    pub fn log(&self, a: u8) -> u8 {
        debug_assert!(a != 0, "Log of zero is undefined");
        self.log[a as usize]
    }

    pub fn antilog(&self, e: usize) -> u8 {
        self.exp[e % 255]
    }

    pub fn multiply(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let e = self.log[a as usize] as usize + self.log[b as usize] as usize;
        self.exp[e % 255]
    }

    // b^254 is the multiplicative inverse of b
    pub fn divide(&self, a: u8, b: u8) -> u8 {
        debug_assert!(b != 0, "Division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        let e = self.log[a as usize] as usize + self.log[b as usize] as usize * 254;
        self.exp[e % 255]
    }
}

// Polynomials
//------------------------------------------------------------------------------

// Coefficients are stored highest degree first
impl GaloisField {
    pub fn poly_multiply(&self, p: &[u8], q: &[u8]) -> Vec<u8> {
        if p.is_empty() || q.is_empty() {
            return Vec::new();
        }
        let mut res = vec![0u8; p.len() + q.len() - 1];
        for (i, &a) in p.iter().enumerate() {
            for (j, &b) in q.iter().enumerate() {
                res[i + j] ^= self.multiply(a, b);
            }
        }
        res
    }

    pub fn poly_remainder(&self, dividend: &[u8], divisor: &[u8]) -> Vec<u8> {
        debug_assert!(!divisor.is_empty() && divisor[0] != 0, "Divisor must have a leading term");
        debug_assert!(dividend.len() >= divisor.len(), "Dividend shorter than divisor");

        let steps = dividend.len() + 1 - divisor.len();
        let mut rem = dividend.to_vec();
        for i in 0..steps {
            let lead = rem[i];
            if lead == 0 {
                continue;
            }
            let factor = self.divide(lead, divisor[0]);
            for (r, &d) in rem[i..].iter_mut().zip(divisor) {
                *r ^= self.multiply(d, factor);
            }
        }
        rem.split_off(steps)
    }

    pub fn generator_polynomial(&self, degree: usize) -> Vec<u8> {
        (0..degree).fold(vec![1], |acc, i| self.poly_multiply(&acc, &[1, self.antilog(i)]))
    }
}
