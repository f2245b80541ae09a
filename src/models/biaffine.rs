use std::rc::Rc;

use primitiv::functions as F;
use primitiv::Initializer;
use primitiv::Node;
use primitiv::Variable;

use models::{Bilinear, Linear};
use syntax::hypergraph::{Item, ScoreItems};

/// A biaffine scorer over pairs of item representations.
///
/// Each side is projected and squashed before the bilinear form, which
/// keeps the pairwise scoring matrix small.
#[derive(Debug, Model, Serialize, Deserialize)]
pub struct Biaffine {
    #[primitiv(submodel)]
    linear_l: Linear,
    #[primitiv(submodel)]
    linear_r: Linear,
    #[primitiv(submodel)]
    bilinear: Bilinear,
    dropout_rate: f32,
}

impl Biaffine {
    pub fn new(dropout_rate: f32) -> Self {
        Biaffine {
            linear_l: Linear::new(true),
            linear_r: Linear::new(true),
            bilinear: Bilinear::default(),
            dropout_rate: dropout_rate,
        }
    }

    pub fn init(&mut self, in_size: u32, proj_size: u32) {
        self.init_by_initializer(in_size, proj_size, &Self::default_initializer())
    }

    pub fn init_by_initializer<I: Initializer>(
        &mut self,
        in_size: u32,
        proj_size: u32,
        initializer: &I,
    ) {
        self.linear_l
            .init_by_initializer(in_size, proj_size, initializer);
        self.linear_r
            .init_by_initializer(in_size, proj_size, initializer);
        self.bilinear
            .init_by_initializer(proj_size, proj_size, initializer);
    }

    /// Scores a pair, one scalar per minibatch element.
    pub fn forward<V: Variable, X1: AsRef<V>, X2: AsRef<V>>(
        &mut self,
        x1: X1,
        x2: X2,
        train: bool,
    ) -> V {
        let h1 = F::dropout(
            F::tanh(self.linear_l.forward(x1.as_ref())),
            self.dropout_rate,
            train,
        );
        let h2 = F::dropout(
            F::tanh(self.linear_r.forward(x2.as_ref())),
            self.dropout_rate,
            train,
        );
        self.bilinear.forward(h1, h2)
    }

    pub fn default_initializer() -> impl Initializer {
        Linear::default_initializer()
    }
}

/// Scores chart items with a biaffine form over precomputed token
/// representations.
///
/// The span side is the boundary difference of the covered interval and
/// the head side is the head token's vector. Representations are set
/// once per sentence before decoding.
#[derive(Debug)]
pub struct BiaffineItemScorer {
    biaffine: Biaffine,
    reps: Vec<Vec<f32>>,
    train: bool,
}

impl BiaffineItemScorer {
    pub fn new(biaffine: Biaffine) -> Self {
        BiaffineItemScorer {
            biaffine: biaffine,
            reps: Vec::new(),
            train: false,
        }
    }

    pub fn set_representations(&mut self, reps: Vec<Vec<f32>>) {
        self.reps = reps;
    }

    pub fn enable_dropout(&mut self, train: bool) {
        self.train = train;
    }

    pub fn biaffine_mut(&mut self) -> &mut Biaffine {
        &mut self.biaffine
    }
}

impl ScoreItems for BiaffineItemScorer {
    fn score(&mut self, candidates: &[Rc<Item>]) -> Vec<f32> {
        let mut scores = Vec::with_capacity(candidates.len());
        for item in candidates {
            let (i, j, h) = item.span();
            let left = &self.reps[i as usize];
            let right = &self.reps[(j - 1) as usize];
            let dim = left.len() as u32;
            let diff: Vec<f32> = right.iter().zip(left.iter()).map(|(r, l)| r - l).collect();
            let span: Node = F::input([dim], &diff);
            let head: Node = F::input([dim], &self.reps[h as usize]);
            let y: Node = self.biaffine.forward(span, head, self.train);
            scores.push(y.to_float());
        }
        scores
    }
}
