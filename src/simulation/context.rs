//! 模拟上下文与逐帧驱动

use crate::config::SimulationConfig;
use crate::core::{EngineResult, FixedTimestep};
use crate::domain::{DomainError, Particle, ParticleId, PhysicsError};
use crate::physics::{CollisionService, CollisionStats, PickHit, PickingService};
use crate::render::{DrawList, DrawRequest};
use crate::scene::{build_static_particles, Camera, Ground};
use crate::simulation::input::{FrameInput, InputEvent};
use crate::simulation::spawn::sample_particle;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// 单帧执行结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    /// 帧序号（从 1 开始）
    pub frame: u64,
    /// 本帧模拟的总时长（秒）
    pub dt: f32,
    /// 本帧执行的积分子步数
    pub substeps: u32,
    /// 本帧新生成的粒子数
    pub spawned: usize,
    /// 本帧被拾取移除的粒子
    pub removed: Vec<ParticleId>,
    /// 最后一次命中的拾取点
    pub pick_point: Option<Vec3>,
    /// 动态-动态响应的执行次数，而非相交对数
    ///
    /// `Ordered` 模式下每对被访问两次，仍相交的对会被再次响应并重复计数。
    pub dynamic_contacts: usize,
    /// 动态-静态响应的执行次数
    pub static_contacts: usize,
    pub draw_calls: usize,
}

impl FrameReport {
    fn new(frame: u64) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    fn record(&mut self, stats: CollisionStats) {
        self.dynamic_contacts += stats.dynamic_contacts;
        self.static_contacts += stats.static_contacts;
    }
}

/// 模拟上下文
///
/// 独占全部可变状态：动态与静态粒子、相机、随机数源、ID 计数器和可复用的绘制列表。
/// 每帧按固定顺序执行：输入事件 → 积分 → 按高度排序 → 动态-动态响应 →
/// 动态-静态响应 → 生成绘制请求。
pub struct SimulationContext {
    config: SimulationConfig,
    dynamic: Vec<Particle>,
    statics: Vec<Particle>,
    camera: Camera,
    ground: Option<Ground>,
    rng: StdRng,
    next_id: u64,
    draw_list: DrawList,
    frame: u64,
}

impl SimulationContext {
    /// 校验配置并搭建场景
    pub fn new(config: SimulationConfig) -> EngineResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut next_id = 0;
        let statics = build_static_particles(&config.scene, &mut rng, &mut next_id)?;
        let ground = Ground::from_config(&config.scene.ground, &mut rng);
        let camera = Camera::from_config(&config.scene.camera);

        tracing::info!(
            target: "simulation",
            static_bodies = statics.len(),
            seed = ?config.seed,
            pair_iteration = ?config.physics.pair_iteration,
            pick_mode = ?config.physics.pick_mode,
            "Simulation context created"
        );

        Ok(Self {
            draw_list: DrawList::with_capacity(statics.len() + 2),
            config,
            dynamic: Vec::new(),
            statics,
            camera,
            ground,
            rng,
            next_id,
            frame: 0,
        })
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> EngineResult<Self> {
        Self::new(SimulationConfig::default())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// 动态粒子（每帧积分后按 Y 降序排列）
    pub fn dynamic_particles(&self) -> &[Particle] {
        &self.dynamic
    }

    pub fn static_particles(&self) -> &[Particle] {
        &self.statics
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.dynamic
            .iter()
            .chain(self.statics.iter())
            .find(|p| p.id() == id)
    }

    /// 最近一帧的绘制列表
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// 已执行的帧数
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// 动态粒子总动量
    pub fn total_momentum(&self) -> Vec3 {
        self.dynamic.iter().map(Particle::momentum).sum()
    }

    /// 动态粒子总动能
    pub fn kinetic_energy(&self) -> f32 {
        self.dynamic.iter().map(Particle::kinetic_energy).sum()
    }

    fn allocate_id(&mut self) -> ParticleId {
        let id = ParticleId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// 生成一批动态粒子，返回生成数量
    ///
    /// 任一粒子采样失败时整批丢弃，粒子列表与 ID 计数器保持不变。
    pub fn spawn_burst(&mut self) -> Result<usize, DomainError> {
        let count = self.config.spawn.count as usize;
        let first_id = self.next_id;
        let mut burst = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.allocate_id();
            match sample_particle(&self.config.spawn, self.config.physics.gravity, &mut self.rng, id) {
                Ok(particle) => burst.push(particle),
                Err(err) => {
                    self.next_id = first_id;
                    return Err(err);
                }
            }
        }
        self.dynamic.extend(burst);
        tracing::debug!(target: "simulation", count, total = self.dynamic.len(), "Spawned particles");
        Ok(count)
    }

    /// 在指定位置加入一个动态粒子
    pub fn add_dynamic(
        &mut self,
        position: Vec3,
        radius: f32,
        elasticity: f32,
        velocity: Vec3,
    ) -> Result<ParticleId, DomainError> {
        let id = ParticleId::new(self.next_id);
        let particle = Particle::dynamic(id, position, radius, elasticity)?
            .with_acceleration(self.config.physics.gravity)
            .with_velocity(velocity)?;
        self.next_id += 1;
        self.dynamic.push(particle);
        Ok(id)
    }

    /// 按 ID 移除动态粒子，保持其余粒子的相对顺序
    pub fn remove(&mut self, id: ParticleId) -> Result<Particle, DomainError> {
        let index = self
            .dynamic
            .iter()
            .position(|p| p.id() == id)
            .ok_or(PhysicsError::ParticleNotFound(id.as_u64()))?;
        Ok(self.dynamic.remove(index))
    }

    /// 从屏幕坐标拾取动态粒子（不移除）
    pub fn pick(&self, screen_x: f32, screen_y: f32) -> Option<PickHit> {
        PickingService::shoot_ray(
            &self.camera,
            screen_x,
            screen_y,
            &self.dynamic,
            self.config.physics.pick_mode,
        )
    }

    /// 以配置步长推进一帧
    pub fn step(&mut self, input: &FrameInput) -> EngineResult<FrameReport> {
        let dt = self.config.timestep.select(input.fast);
        self.step_with_dt(input, dt)
    }

    /// 以指定步长推进一帧
    pub fn step_with_dt(&mut self, input: &FrameInput, dt: f32) -> EngineResult<FrameReport> {
        let mut report = self.begin_frame(input)?;
        let stats = self.simulate(dt);
        report.record(stats);
        report.dt = dt;
        report.substeps = 1;
        self.finish_frame(&mut report);
        Ok(report)
    }

    /// 以可变帧时长推进，内部拆成若干固定子步
    ///
    /// 输入事件在第一个子步前处理一次，绘制列表在最后一个子步后生成一次。
    /// 累加不足一个步长时本帧不积分，但事件与绘制照常进行。
    pub fn advance(
        &mut self,
        frame_seconds: f32,
        input: &FrameInput,
        timestep: &mut FixedTimestep,
    ) -> EngineResult<FrameReport> {
        timestep.set_step(self.config.timestep.select(input.fast));
        let mut report = self.begin_frame(input)?;

        let substeps = timestep.advance(frame_seconds);
        let dt = timestep.step();
        for _ in 0..substeps {
            let stats = self.simulate(dt);
            report.record(stats);
        }
        report.dt = dt * substeps as f32;
        report.substeps = substeps;

        self.finish_frame(&mut report);
        Ok(report)
    }

    fn begin_frame(&mut self, input: &FrameInput) -> EngineResult<FrameReport> {
        self.frame += 1;
        self.draw_list.clear();
        let mut report = FrameReport::new(self.frame);
        self.apply_events(&input.events, &mut report)?;
        Ok(report)
    }

    fn finish_frame(&mut self, report: &mut FrameReport) {
        self.build_draw_list();
        report.draw_calls = self.draw_list.len();
        tracing::trace!(
            target: "simulation",
            frame = report.frame,
            particles = self.dynamic.len(),
            draw_calls = report.draw_calls,
            "Frame finished"
        );
    }

    /// 先处理全部生成事件，再按原有相对顺序处理拾取事件
    fn apply_events(&mut self, events: &[InputEvent], report: &mut FrameReport) -> EngineResult<()> {
        for event in events {
            if matches!(event, InputEvent::SpawnRequested) {
                report.spawned += self.spawn_burst()?;
            }
        }

        for event in events {
            if let InputEvent::PickRequested { x, y } = *event {
                let Some(hit) = self.pick(x, y) else {
                    continue;
                };
                let removed = self.dynamic.remove(hit.index);
                tracing::debug!(
                    target: "simulation",
                    particle = %removed.id(),
                    point = ?hit.point,
                    "Picked particle removed"
                );
                self.draw_list.push(DrawRequest::pick_marker(hit.point));
                report.removed.push(removed.id());
                report.pick_point = Some(hit.point);
            }
        }
        Ok(())
    }

    /// 单个积分子步：积分、排序、碰撞响应
    fn simulate(&mut self, dt: f32) -> CollisionStats {
        for particle in &mut self.dynamic {
            particle.tick(dt);
        }

        // 稳定排序，高处的粒子先参与响应
        self.dynamic
            .sort_by(|a, b| b.position().y.total_cmp(&a.position().y));

        let physics = &self.config.physics;
        let dynamic_contacts = CollisionService::resolve_dynamic_set(&mut self.dynamic, physics.pair_iteration);
        let static_contacts =
            CollisionService::resolve_static_set(&mut self.dynamic, &self.statics, physics.position_bias);

        CollisionStats {
            dynamic_contacts,
            static_contacts,
        }
    }

    fn build_draw_list(&mut self) {
        let spheres = self
            .dynamic
            .iter()
            .chain(self.statics.iter())
            .filter(|p| p.visible)
            .map(|p| DrawRequest::sphere(p.position(), p.radius(), p.color));
        for request in spheres {
            self.draw_list.push(request);
        }
        if let Some(ground) = &self.ground {
            self.draw_list.push(ground.draw_request());
        }
    }
}
