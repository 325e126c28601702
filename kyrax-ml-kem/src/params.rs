//! ML-KEM parameter sets as defined in FIPS 203.

use core::fmt;
use core::str::FromStr;
use kyrax_core::Error;

/// Polynomial ring dimension (n).
pub const N: usize = 256;

/// Modulus (q).
pub const Q: u16 = 3329;

/// Bytes of one 12-bit encoded polynomial.
pub const POLY_BYTES: usize = 384;

/// Size of the public seed rho, the hash H(ek) and the rejection value z.
pub const SYM_BYTES: usize = 32;

/// Shared secret size in bytes.
pub const SHARED_SECRET_SIZE: usize = 32;

/// Seed size for deterministic key derivation (d || z).
pub const KEYPAIR_SEED_SIZE: usize = 64;

/// Message size for deterministic encapsulation.
pub const MESSAGE_SIZE: usize = 32;

/// Constants of one ML-KEM parameter set.
///
/// Every byte size used by the scheme is derived from these five numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterSet {
    name: &'static str,
    k: usize,
    du: usize,
    dv: usize,
    eta1: usize,
    eta2: usize,
}

/// ML-KEM-512 (NIST Security Level 1).
pub const ML_KEM_512: ParameterSet = ParameterSet {
    name: "ML-KEM-512",
    k: 2,
    du: 10,
    dv: 4,
    eta1: 3,
    eta2: 2,
};

/// ML-KEM-768 (NIST Security Level 3).
pub const ML_KEM_768: ParameterSet = ParameterSet {
    name: "ML-KEM-768",
    k: 3,
    du: 10,
    dv: 4,
    eta1: 2,
    eta2: 2,
};

/// ML-KEM-1024 (NIST Security Level 5).
pub const ML_KEM_1024: ParameterSet = ParameterSet {
    name: "ML-KEM-1024",
    k: 4,
    du: 11,
    dv: 5,
    eta1: 2,
    eta2: 2,
};

impl ParameterSet {
    /// All supported parameter sets, weakest first.
    pub const ALL: [ParameterSet; 3] = [ML_KEM_512, ML_KEM_768, ML_KEM_1024];

    /// Canonical name, e.g. `ML-KEM-768`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Module rank (k).
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Compression bits for u (du).
    pub const fn du(&self) -> usize {
        self.du
    }

    /// Compression bits for v (dv).
    pub const fn dv(&self) -> usize {
        self.dv
    }

    /// Noise parameter for s, e and r (eta1).
    pub const fn eta1(&self) -> usize {
        self.eta1
    }

    /// Noise parameter for e1 and e2 (eta2).
    pub const fn eta2(&self) -> usize {
        self.eta2
    }

    /// Encoded secret vector s (12 bits per coefficient).
    pub const fn poly_vec_bytes(&self) -> usize {
        self.k * POLY_BYTES
    }

    /// Encapsulation key: encoded t followed by rho.
    pub const fn encapsulation_key_size(&self) -> usize {
        self.poly_vec_bytes() + SYM_BYTES
    }

    /// Decapsulation key: s, ek, H(ek) and z.
    pub const fn decapsulation_key_size(&self) -> usize {
        self.poly_vec_bytes() + self.encapsulation_key_size() + 2 * SYM_BYTES
    }

    /// Compressed u vector.
    pub const fn compressed_u_size(&self) -> usize {
        self.k * self.du * N / 8
    }

    /// Compressed v polynomial.
    pub const fn compressed_v_size(&self) -> usize {
        self.dv * N / 8
    }

    /// Ciphertext: compressed u followed by compressed v.
    pub const fn ciphertext_size(&self) -> usize {
        self.compressed_u_size() + self.compressed_v_size()
    }

    /// Shared secret size (32 for every set).
    pub const fn shared_secret_size(&self) -> usize {
        SHARED_SECRET_SIZE
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for ParameterSet {
    type Err = Error;

    /// Accepts `512`, `ML-KEM-512` or `ml-kem-512` (and likewise for 768 and 1024).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s
            .strip_prefix("ML-KEM-")
            .or_else(|| s.strip_prefix("ml-kem-"))
            .unwrap_or(s);
        match level {
            "512" => Ok(ML_KEM_512),
            "768" => Ok(ML_KEM_768),
            "1024" => Ok(ML_KEM_1024),
            _ => Err(Error::UnsupportedParameterSet),
        }
    }
}
