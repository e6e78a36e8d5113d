use aid_discovery::discovery::{LookupTxt, TxtAnswer};
use std::{
    future::Future,
    io,
    pin::Pin,
    sync::{Arc, Mutex},
};

pub type LookupOutput = TxtAnswer<Vec<io::Result<Vec<u8>>>>;
pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = io::Result<LookupOutput>> + Send + 'a>>;

/// A lookup backed by a closure, which also records the names queried.
#[derive(Clone)]
pub struct MockLookup {
    f: Arc<dyn Fn(&str) -> LookupFuture<'_> + Send + Sync>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockLookup {
    pub fn new(f: impl Fn(&str) -> LookupFuture<'_> + Send + Sync + 'static) -> Self {
        Self {
            f: Arc::new(f),
            queries: Default::default(),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl LookupTxt for MockLookup {
    type Answer = Vec<io::Result<Vec<u8>>>;
    type Query<'a> = Pin<Box<dyn Future<Output = io::Result<TxtAnswer<Self::Answer>>> + Send + 'a>>;

    fn lookup_txt(&self, domain: &str) -> Self::Query<'_> {
        self.queries.lock().unwrap().push(domain.to_owned());

        let domain = domain.to_owned();

        Box::pin(async move { (self.f)(&domain).await })
    }
}

/// Makes a successful answer from the given TXT strings.
pub fn answer<I, S>(txts: I, ttl: u32) -> io::Result<LookupOutput>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let txts = txts.into_iter().map(|s| Ok(s.into().into_bytes())).collect();
    Ok(TxtAnswer::new(txts, ttl))
}

/// Makes a failed answer with the given error kind.
pub fn error(kind: io::ErrorKind) -> io::Result<LookupOutput> {
    Err(kind.into())
}
