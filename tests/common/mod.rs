#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, bail};
use raydium_sdk_examples::{
    AccountClient, Connection, Dex, FarmClient, LiquidityClient, MakeTxData, Owner, SessionLoader,
    Token, TokenAmount, TradeClient,
    amm::{
        AddLiquidityParams, AvailablePools, BestAmountOut, BestAmountOutParams,
        ComputePairAmountParams, CreateFarmParams, CreatePoolParams, DirectSwapParams,
        FarmDepositParams, FarmWithdrawParams, InitPoolParams, PairAmount, PoolRoute,
        RemoveLiquidityParams, RouteType, SwapExtInfo, TokenAccount, TradeSwapParams,
    },
    constants::{LIQUIDITY_PROGRAM_ID_V4, RAY_MINT, SOL_DECIMALS, SOL_MINT, USDC_MINT},
    registry::{FarmInfo, PoolInfo, find_pool_by_mints},
};
use solana_sdk::{
    commitment_config::CommitmentLevel,
    message::{Message, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::VersionedTransaction,
};

pub const LOCAL_RPC: &str = "http://127.0.0.1:8899";
pub const OTHER_RPC: &str = "http://127.0.0.1:9999";

pub fn connection(endpoint: &str) -> Connection {
    Connection::new(endpoint, CommitmentLevel::Confirmed)
}

pub fn owner() -> Owner {
    Owner::from(Keypair::new())
}

/// Records every builder and submission call made against mock sessions
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    loads: Arc<AtomicUsize>,
    builds: Arc<AtomicUsize>,
    submissions: Arc<AtomicUsize>,
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn event(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn build(&self, event: String) -> MakeTxData<()> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.event(event);
        MakeTxData::new(empty_transaction(), ())
    }
}

fn empty_transaction() -> VersionedTransaction {
    VersionedTransaction {
        signatures: vec![],
        message: VersionedMessage::Legacy(Message::default()),
    }
}

/// Registry contents handed to every session a `MockLoader` builds
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub pools: Vec<PoolInfo>,
    pub farms: Vec<FarmInfo>,
    pub tokens: Vec<Token>,
    pub token_accounts: Vec<TokenAccount>,
    pub accounts: HashMap<Pubkey, Vec<u8>>,
}

pub struct Pools {
    pub ray_usdc: PoolInfo,
    pub ray_sol: PoolInfo,
    pub sol_usdc: PoolInfo,
}

pub fn pool(base: Token, quote: Token) -> PoolInfo {
    PoolInfo {
        id: Pubkey::new_unique(),
        base_mint: base.mint,
        quote_mint: quote.mint,
        lp_mint: Pubkey::new_unique(),
        base_decimals: base.decimals,
        quote_decimals: quote.decimals,
        lp_decimals: base.decimals,
        version: 4,
        program_id: LIQUIDITY_PROGRAM_ID_V4,
        market_id: Pubkey::new_unique(),
    }
}

pub fn ray() -> Token {
    Token::new(RAY_MINT, 6).with_symbol("RAY")
}

pub fn usdc() -> Token {
    Token::new(USDC_MINT, 6).with_symbol("USDC")
}

pub fn sol() -> Token {
    Token::new(SOL_MINT, SOL_DECIMALS).with_symbol("SOL")
}

impl Fixture {
    /// RAY-USDC, RAY-SOL and SOL-USDC pools with a RAY-USDC farm
    pub fn standard() -> (Self, Pools, FarmInfo) {
        let pools = Pools {
            ray_usdc: pool(ray(), usdc()),
            ray_sol: pool(ray(), sol()),
            sol_usdc: pool(sol(), usdc()),
        };
        let farm = FarmInfo {
            id: Pubkey::new_unique(),
            base_mint: RAY_MINT,
            quote_mint: USDC_MINT,
            lp_mint: pools.ray_usdc.lp_mint,
            lp_decimals: pools.ray_usdc.lp_decimals,
            reward_mints: vec![RAY_MINT],
        };

        let fixture = Self {
            pools: vec![
                pools.ray_usdc.clone(),
                pools.ray_sol.clone(),
                pools.sol_usdc.clone(),
            ],
            farms: vec![farm.clone()],
            tokens: vec![ray(), usdc(), sol()],
            token_accounts: vec![
                TokenAccount {
                    address: Pubkey::new_unique(),
                    mint: RAY_MINT,
                    amount: 40_000_000,
                },
                TokenAccount {
                    address: Pubkey::new_unique(),
                    mint: RAY_MINT,
                    amount: 2_000_000,
                },
            ],
            accounts: HashMap::new(),
        };

        (fixture, pools, farm)
    }
}

#[derive(Debug)]
pub struct MockLoader {
    pub recorder: Recorder,
    pub fixture: Fixture,
    pub load_delay: Duration,
    pub fail_next_load: AtomicBool,
}

impl MockLoader {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            recorder: Recorder::default(),
            fixture,
            load_delay: Duration::ZERO,
            fail_next_load: AtomicBool::new(false),
        }
    }

    pub fn with_delay(mut self, load_delay: Duration) -> Self {
        self.load_delay = load_delay;
        self
    }
}

impl SessionLoader for MockLoader {
    type Session = MockDex;

    fn load(
        &self,
        connection: &Connection,
        owner: Option<&Owner>,
    ) -> impl Future<Output = Result<MockDex>> + Send {
        let connection = connection.clone();
        let owner = owner.cloned();

        async move {
            if !self.load_delay.is_zero() {
                tokio::time::sleep(self.load_delay).await;
            }
            if self.fail_next_load.swap(false, Ordering::SeqCst) {
                bail!("endpoint {} unreachable", connection.endpoint());
            }

            let generation = self.recorder.loads.fetch_add(1, Ordering::SeqCst) + 1;
            let recorder = self.recorder.clone();
            let fixture = self.fixture.clone();

            Ok(MockDex {
                generation,
                connection,
                owner,
                tokens: fixture.tokens.clone(),
                accounts: fixture.accounts.clone(),
                trade: MockTrade {
                    recorder: recorder.clone(),
                    pools: fixture.pools.clone(),
                },
                liquidity: MockLiquidity {
                    recorder: recorder.clone(),
                    pools: fixture.pools.clone(),
                },
                farm: MockFarm {
                    recorder: recorder.clone(),
                    farms: fixture.farms.clone(),
                    loaded: AtomicBool::new(false),
                },
                account: MockAccount {
                    token_accounts: fixture.token_accounts.clone(),
                },
                recorder,
            })
        }
    }
}

#[derive(Debug)]
pub struct MockDex {
    pub generation: usize,
    connection: Connection,
    owner: Option<Owner>,
    tokens: Vec<Token>,
    accounts: HashMap<Pubkey, Vec<u8>>,
    trade: MockTrade,
    liquidity: MockLiquidity,
    farm: MockFarm,
    account: MockAccount,
    recorder: Recorder,
}

impl Dex for MockDex {
    type Trade = MockTrade;
    type Liquidity = MockLiquidity;
    type Farm = MockFarm;
    type Account = MockAccount;

    fn connection(&self) -> &Connection {
        &self.connection
    }

    fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    fn trade(&self) -> &MockTrade {
        &self.trade
    }

    fn liquidity(&self) -> &MockLiquidity {
        &self.liquidity
    }

    fn farm(&self) -> &MockFarm {
        &self.farm
    }

    fn account(&self) -> &MockAccount {
        &self.account
    }

    fn mint_to_token(&self, mint: &Pubkey) -> Option<Token> {
        self.tokens.iter().find(|token| token.mint == *mint).cloned()
    }

    fn get_account_data(
        &self,
        key: &Pubkey,
    ) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        let data = self.accounts.get(key).cloned();
        async move { Ok(data) }
    }

    fn execute<T: Send>(
        &self,
        _tx_data: MakeTxData<T>,
    ) -> impl Future<Output = Result<Signature>> + Send {
        self.recorder.submissions.fetch_add(1, Ordering::SeqCst);
        self.recorder.event("execute".to_string());
        async move { Ok(Signature::new_unique()) }
    }
}

#[derive(Debug)]
pub struct MockTrade {
    recorder: Recorder,
    pools: Vec<PoolInfo>,
}

impl TradeClient for MockTrade {
    fn get_available_pools(
        &self,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
    ) -> impl Future<Output = Result<AvailablePools>> + Send {
        let direct: Vec<PoolInfo> = self
            .pools
            .iter()
            .filter(|pool| pool.matches_mints(input_mint, output_mint))
            .cloned()
            .collect();

        async move {
            Ok(AvailablePools {
                best: direct.first().cloned(),
                routed_pools: direct.iter().cloned().map(|pool| vec![pool]).collect(),
                available_pools: direct,
            })
        }
    }

    fn get_best_amount_out(
        &self,
        params: BestAmountOutParams,
    ) -> impl Future<Output = Result<BestAmountOut>> + Send {
        self.recorder.event("get_best_amount_out".to_string());
        let fallback = find_pool_by_mints(
            &self.pools,
            &params.input_token.mint,
            &params.output_token.mint,
        )
        .cloned();

        async move {
            let path = match params.pools.and_then(|paths| paths.into_iter().next()) {
                Some(path) => path,
                None => fallback.into_iter().collect(),
            };
            if path.is_empty() {
                bail!("no pool to quote");
            }

            let mut routes = Vec::with_capacity(path.len());
            let mut current = params.input_token.mint;
            for pool in &path {
                let Some(next) = pool.other_mint(&current) else {
                    bail!("pool {} does not trade {}", pool.id, current);
                };
                routes.push(PoolRoute {
                    pool_id: pool.id,
                    input_mint: current,
                    output_mint: next,
                });
                current = next;
            }

            let amount_out = TokenAmount::new(params.output_token.clone(), params.amount_in.raw);
            let min_amount_out = TokenAmount::new(
                params.output_token,
                params.slippage.min_amount(params.amount_in.raw),
            );

            Ok(BestAmountOut {
                amount_out,
                min_amount_out,
                route_type: if routes.len() == 1 {
                    RouteType::Amm
                } else {
                    RouteType::Route
                },
                routes,
            })
        }
    }

    fn swap(
        &self,
        params: TradeSwapParams,
    ) -> impl Future<Output = Result<MakeTxData<SwapExtInfo>>> + Send {
        let tx_data = self.recorder.build(format!(
            "swap:{:?}:{}:{}:{}",
            params.route_type,
            params.routes.len(),
            params.amount_in.raw,
            params.amount_out.raw
        ));
        async move {
            Ok(MakeTxData::new(
                tx_data.transaction,
                SwapExtInfo {
                    amount_out: params.amount_out,
                },
            ))
        }
    }

    fn direct_swap(
        &self,
        params: DirectSwapParams,
    ) -> impl Future<Output = Result<MakeTxData<SwapExtInfo>>> + Send {
        let tx_data = self.recorder.build(format!(
            "direct_swap:{}:{}",
            params.amount_in.raw, params.amount_out.raw
        ));
        async move {
            Ok(MakeTxData::new(
                tx_data.transaction,
                SwapExtInfo {
                    amount_out: params.amount_out,
                },
            ))
        }
    }
}

#[derive(Debug)]
pub struct MockLiquidity {
    recorder: Recorder,
    pools: Vec<PoolInfo>,
}

impl LiquidityClient for MockLiquidity {
    fn program_id(&self) -> Pubkey {
        LIQUIDITY_PROGRAM_ID_V4
    }

    fn pools(&self) -> Vec<PoolInfo> {
        self.pools.clone()
    }

    fn compute_pair_amount(
        &self,
        params: ComputePairAmountParams,
    ) -> impl Future<Output = Result<PairAmount>> + Send {
        self.recorder.event("compute_pair_amount".to_string());
        async move {
            let raw = params.amount.raw;
            Ok(PairAmount {
                another_amount: TokenAmount::new(params.another_token.clone(), raw),
                max_another_amount: TokenAmount::new(params.another_token, raw + raw / 100),
            })
        }
    }

    fn add_liquidity(
        &self,
        params: AddLiquidityParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send {
        let tx_data = self.recorder.build(format!(
            "add_liquidity:{:?}:{}:{}",
            params.fixed_side, params.amount_in_a.raw, params.amount_in_b.raw
        ));
        async move { Ok(tx_data) }
    }

    fn remove_liquidity(
        &self,
        params: RemoveLiquidityParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send {
        let tx_data = self
            .recorder
            .build(format!("remove_liquidity:{}", params.amount_in.raw));
        async move { Ok(tx_data) }
    }

    fn create_pool(
        &self,
        params: CreatePoolParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send {
        let tx_data = self
            .recorder
            .build(format!("create_pool:v{}", params.version));
        async move { Ok(tx_data) }
    }

    fn init_pool(
        &self,
        params: InitPoolParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send {
        let tx_data = self.recorder.build(format!(
            "init_pool:{}:{}",
            params.base_amount.raw, params.quote_amount.raw
        ));
        async move { Ok(tx_data) }
    }
}

#[derive(Debug)]
pub struct MockFarm {
    recorder: Recorder,
    farms: Vec<FarmInfo>,
    loaded: AtomicBool,
}

impl FarmClient for MockFarm {
    fn load(&self) -> impl Future<Output = Result<()>> + Send {
        self.loaded.store(true, Ordering::SeqCst);
        self.recorder.event("farm_load".to_string());
        async move { Ok(()) }
    }

    // farms are only known once loaded
    fn farms(&self) -> Vec<FarmInfo> {
        if self.loaded.load(Ordering::SeqCst) {
            self.farms.clone()
        } else {
            vec![]
        }
    }

    fn deposit(
        &self,
        params: FarmDepositParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send {
        let tx_data = self
            .recorder
            .build(format!("farm_deposit:{}", params.amount.raw));
        async move { Ok(tx_data) }
    }

    fn withdraw(
        &self,
        params: FarmWithdrawParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send {
        let tx_data = self
            .recorder
            .build(format!("farm_withdraw:{}", params.amount.raw));
        async move { Ok(tx_data) }
    }

    fn create(
        &self,
        params: CreateFarmParams,
    ) -> impl Future<Output = Result<MakeTxData<()>>> + Send {
        let tx_data = self
            .recorder
            .build(format!("create_farm:{}", params.reward_infos.len()));
        async move { Ok(tx_data) }
    }
}

#[derive(Debug)]
pub struct MockAccount {
    token_accounts: Vec<TokenAccount>,
}

impl AccountClient for MockAccount {
    fn token_accounts(&self) -> Vec<TokenAccount> {
        self.token_accounts.clone()
    }
}
