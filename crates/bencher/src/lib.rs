//! Request head fixtures shared by the benchmarks.

#[derive(Debug, Copy, Clone)]
pub struct Fixture {
    name: &'static str,
    size: FixtureSize,
    content: &'static [u8],
}

impl Fixture {
    pub const fn new(name: &'static str, size: FixtureSize, content: &'static [u8]) -> Self {
        Self { name, size, content }
    }

    pub const fn small(name: &'static str, content: &'static [u8]) -> Self {
        Self::new(name, FixtureSize::Small, content)
    }

    pub const fn large(name: &'static str, content: &'static [u8]) -> Self {
        Self::new(name, FixtureSize::Large, content)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> FixtureSize {
        self.size
    }

    /// Benchmark parameter grouping the fixture under its size, e.g. `small/get_small`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.size.as_str(), self.name())
    }

    pub fn content(&self) -> &'static [u8] {
        self.content
    }

    /// Splits the content into pieces of at most `piece_len` bytes, as a socket might deliver it.
    pub fn pieces(&self, piece_len: usize) -> impl Iterator<Item = &'static [u8]> {
        self.content.chunks(piece_len.max(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureSize {
    Small,
    Large,
}

impl FixtureSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureSize::Small => "small",
            FixtureSize::Large => "large",
        }
    }
}

pub static SMALL_HEAD: Fixture = Fixture::small("get_small", include_bytes!("../resources/request/get_small.txt"));
pub static LARGE_HEAD: Fixture = Fixture::large("get_large", include_bytes!("../resources/request/get_large.txt"));

pub fn fixtures() -> [Fixture; 2] {
    [SMALL_HEAD, LARGE_HEAD]
}
