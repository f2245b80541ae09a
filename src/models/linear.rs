use primitiv::functions as F;
use primitiv::initializers::{Constant, XavierUniform};
use primitiv::Initializer;
use primitiv::Parameter;
use primitiv::Variable;

#[derive(Debug, Model, Serialize, Deserialize)]
pub struct Linear {
    pw: Parameter,
    pb: Option<Parameter>,
}

impl Linear {
    pub fn new(use_bias: bool) -> Self {
        Linear {
            pw: Parameter::new(),
            pb: if use_bias {
                Some(Parameter::new())
            } else {
                None
            },
        }
    }

    pub fn init(&mut self, in_size: u32, out_size: u32) {
        self.init_by_initializer(in_size, out_size, &Self::default_initializer());
    }

    pub fn init_by_initializer<I: Initializer>(
        &mut self,
        in_size: u32,
        out_size: u32,
        initializer: &I,
    ) {
        self.pw
            .init_by_initializer([out_size, in_size], initializer);
        if let Some(ref mut pb) = self.pb {
            pb.init_by_initializer([out_size], &Constant::new(0.0));
        }
    }

    pub fn forward<V: Variable, X: AsRef<V>>(&mut self, x: X) -> V {
        let w: V = F::parameter(&mut self.pw);
        let mut y = F::matmul(w, x);
        if let Some(ref mut pb) = self.pb {
            let mut b: V = F::parameter(pb);
            let s = y.shape();
            if s.dims().len() == 2 {
                b = F::broadcast(b, 1, s.at(1));
            }
            y = y + b;
        }
        y
    }

    pub fn default_initializer() -> impl Initializer {
        XavierUniform::default()
    }
}

impl Default for Linear {
    fn default() -> Self {
        Linear::new(true)
    }
}

/// A scalar bilinear form `x1^T W x2` with optional side terms
/// `u . x1`, `v . x2` and a constant bias.
#[derive(Debug, Model, Serialize, Deserialize)]
pub struct Bilinear {
    pw: Parameter,
    pu: Option<Parameter>,
    pv: Option<Parameter>,
    pb: Option<Parameter>,
}

impl Bilinear {
    pub fn new(use_bias: (bool, bool, bool)) -> Self {
        Bilinear {
            pw: Parameter::new(),
            pu: if use_bias.0 {
                Some(Parameter::new())
            } else {
                None
            },
            pv: if use_bias.1 {
                Some(Parameter::new())
            } else {
                None
            },
            pb: if use_bias.2 {
                Some(Parameter::new())
            } else {
                None
            },
        }
    }

    pub fn init(&mut self, in_size1: u32, in_size2: u32) {
        self.init_by_initializer(in_size1, in_size2, &Self::default_initializer())
    }

    pub fn init_by_initializer<I: Initializer>(
        &mut self,
        in_size1: u32,
        in_size2: u32,
        initializer: &I,
    ) {
        self.pw.init_by_initializer([in_size1, in_size2], initializer);
        if let Some(ref mut pu) = self.pu {
            pu.init_by_initializer([1, in_size1], initializer);
        }
        if let Some(ref mut pv) = self.pv {
            pv.init_by_initializer([1, in_size2], initializer);
        }
        if let Some(ref mut pb) = self.pb {
            pb.init_by_initializer([1], &Constant::new(0.0));
        }
    }

    pub fn forward<V: Variable, X1: AsRef<V>, X2: AsRef<V>>(&mut self, x1: X1, x2: X2) -> V {
        let w: V = F::parameter(&mut self.pw);
        let mut y = F::matmul(F::transpose(F::matmul(w, x2.as_ref())), x1.as_ref());
        if let Some(ref mut pu) = self.pu {
            let u: V = F::parameter(pu);
            y = y + F::matmul(u, x1.as_ref());
        }
        if let Some(ref mut pv) = self.pv {
            let v: V = F::parameter(pv);
            y = y + F::matmul(v, x2.as_ref());
        }
        if let Some(ref mut pb) = self.pb {
            let b: V = F::parameter(pb);
            y = y + b;
        }
        y
    }

    pub fn default_initializer() -> impl Initializer {
        XavierUniform::default()
    }
}

impl Default for Bilinear {
    fn default() -> Self {
        Bilinear::new((true, true, true))
    }
}
